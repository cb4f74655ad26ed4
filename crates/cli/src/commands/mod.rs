//! Storefront commands shared by one-shot invocations and the shell.

use std::io::{self, Write};

use clap::{Args, Subcommand};
use rust_decimal::Decimal;
use shopease_core::{Price, ProductFilter, ProductId, Rating, SortKey};
use shopease_storefront::api::Backend;
use shopease_storefront::cart::BackendAck;
use shopease_storefront::product_detail::ReviewSubmission;
use shopease_storefront::storage::StorageError;
use shopease_storefront::{AppError, Storefront};
use thiserror::Error;

pub mod shell;

/// Errors that end a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Storefront operation failed.
    #[error(transparent)]
    Storefront(#[from] AppError),

    /// Writing output failed.
    #[error("Output error: {0}")]
    Io(#[from] io::Error),
}

impl From<StorageError> for CliError {
    fn from(e: StorageError) -> Self {
        Self::Storefront(AppError::Storage(e))
    }
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List products from the backend, optionally filtered and sorted
    Products(FilterArgs),
    /// Narrow the loaded catalog by title or description, without a request
    Search {
        /// Case-insensitive text to match
        query: String,
    },
    /// List product categories
    Categories,
    /// Show a product with its reviews
    Product {
        /// Product identifier
        id: String,
    },
    /// Write a review for a product
    Review(ReviewArgs),
    /// Show the cart drawer
    Cart,
    /// Add one unit of a product to the cart
    Add {
        /// Product identifier
        id: String,
    },
    /// Place the order for everything in the cart
    Checkout,
    /// Show past orders for this session
    Orders,
    /// Print the session identifier
    Session,
}

#[derive(Args, Debug, Default)]
pub struct FilterArgs {
    /// Free-text query
    #[arg(short, long)]
    pub q: Option<String>,

    /// Category name
    #[arg(short, long)]
    pub category: Option<String>,

    /// Lowest price, inclusive
    #[arg(long)]
    pub min_price: Option<Decimal>,

    /// Highest price, inclusive
    #[arg(long)]
    pub max_price: Option<Decimal>,

    /// Ordering (`relevance`, `price_asc`, `price_desc`, `rating_desc`)
    #[arg(short, long, default_value = "relevance")]
    pub sort: SortKey,
}

impl From<FilterArgs> for ProductFilter {
    fn from(args: FilterArgs) -> Self {
        Self {
            query: args.q,
            category: args.category,
            min_price: args.min_price.map(Price::new),
            max_price: args.max_price.map(Price::new),
            sort: args.sort,
        }
    }
}

#[derive(Args, Debug)]
pub struct ReviewArgs {
    /// Product identifier
    pub id: String,

    /// Author display name; an empty name submits nothing
    #[arg(short, long, default_value = "")]
    pub name: String,

    /// Stars, 1 to 5
    #[arg(short, long, default_value = "5")]
    pub rating: Rating,

    /// Comment text
    #[arg(short, long, default_value = "")]
    pub comment: String,
}

impl Command {
    /// Whether the catalog and cart must be loaded before running.
    #[must_use]
    pub const fn needs_start(&self) -> bool {
        matches!(
            self,
            Self::Search { .. } | Self::Cart | Self::Add { .. } | Self::Checkout
        )
    }
}

/// Run one command and write its view to `out`.
///
/// # Errors
///
/// Returns `CliError` if the command names an unknown product, a view fails
/// to render, or `out` cannot be written.
pub async fn run<B: Backend>(
    storefront: &mut Storefront<B>,
    command: Command,
    out: &mut impl Write,
) -> Result<(), CliError> {
    match command {
        Command::Products(args) => {
            storefront.apply_filter(args.into()).await;
            writeln!(out, "{}", storefront.render_products()?)?;
        }
        Command::Search { query } => {
            storefront.search_local(&query);
            writeln!(out, "{}", storefront.render_products()?)?;
        }
        Command::Categories => {
            storefront.load_categories().await;
            writeln!(out, "== Categories ==")?;
            for category in storefront.catalog().categories() {
                writeln!(out, "- {category}")?;
            }
        }
        Command::Product { id } => {
            storefront.open_product(ProductId::new(id)).await;
            writeln!(out, "{}", storefront.render_detail()?)?;
        }
        Command::Review(args) => review(storefront, args, out).await?,
        Command::Cart => {
            storefront.open_cart();
            writeln!(out, "{}", storefront.render_cart()?)?;
        }
        Command::Add { id } => {
            let ack = storefront.add_to_cart(&ProductId::new(id)).await?;
            if ack == BackendAck::Rejected {
                writeln!(out, "(the store did not confirm this change)")?;
            }
            writeln!(out, "{}", storefront.render_cart()?)?;
        }
        Command::Checkout => match storefront.checkout().await {
            Some(outcome) => writeln!(out, "{}", outcome.confirmation)?,
            None => writeln!(out, "Nothing to check out.")?,
        },
        Command::Orders => {
            storefront.load_orders().await;
            writeln!(out, "{}", storefront.render_orders()?)?;
        }
        Command::Session => writeln!(out, "{}", storefront.session_id())?,
    }
    Ok(())
}

/// Fill the review form of `args.id` and submit it.
///
/// Reuses the open detail panel when it already shows the product.
async fn review<B: Backend>(
    storefront: &mut Storefront<B>,
    args: ReviewArgs,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let product_id = ProductId::new(args.id);
    let already_open = storefront
        .detail()
        .is_some_and(|detail| detail.product_id() == &product_id);
    if !already_open {
        storefront.open_product(product_id).await;
    }
    let detail = storefront
        .detail_mut()
        .ok_or_else(|| AppError::BadRequest("no product is open".to_string()))?;
    detail.set_user_name(args.name);
    detail.set_rating(args.rating);
    detail.set_comment(args.comment);

    match storefront.submit_review().await? {
        ReviewSubmission::Skipped => writeln!(out, "A name is required to post a review.")?,
        ReviewSubmission::Posted => writeln!(out, "Review posted.")?,
        ReviewSubmission::Failed => writeln!(out, "The review could not be posted.")?,
    }
    writeln!(out, "{}", storefront.render_detail()?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use clap::Parser;
    use rust_decimal::Decimal;

    use super::*;

    #[derive(Parser)]
    #[command(no_binary_name = true)]
    struct Harness {
        #[command(subcommand)]
        command: Command,
    }

    fn parse(args: &[&str]) -> Command {
        Harness::try_parse_from(args)
            .unwrap_or_else(|e| panic!("{e}"))
            .command
    }

    #[test]
    fn test_filter_args_to_filter() {
        let Command::Products(args) = parse(&[
            "products",
            "--q",
            "shoe",
            "--sort",
            "price_asc",
            "--max-price",
            "50",
        ]) else {
            panic!("expected products");
        };

        let filter = ProductFilter::from(args);
        assert_eq!(filter.query.as_deref(), Some("shoe"));
        assert_eq!(filter.sort, SortKey::PriceAsc);
        assert_eq!(filter.max_price, Some(Price::new(Decimal::from(50))));
        assert_eq!(filter.min_price, None);
    }

    #[test]
    fn test_unknown_sort_is_rejected() {
        assert!(Harness::try_parse_from(["products", "--sort", "newest"]).is_err());
    }

    #[test]
    fn test_review_defaults() {
        let Command::Review(args) = parse(&["review", "p1"]) else {
            panic!("expected review");
        };
        assert_eq!(args.name, "");
        assert_eq!(args.rating.stars(), 5);
        assert_eq!(args.comment, "");
    }

    #[test]
    fn test_rating_out_of_range_is_rejected() {
        assert!(Harness::try_parse_from(["review", "p1", "--rating", "6"]).is_err());
    }

    #[test]
    fn test_non_numeric_rating_is_reported_as_such() {
        let Err(err) = Harness::try_parse_from(["review", "p1", "--rating", "three"]) else {
            panic!("expected a parse error");
        };
        let message = err.to_string();
        assert!(message.contains("whole number"), "{message}");
        assert!(!message.contains("got 0"), "{message}");
    }

    #[test]
    fn test_needs_start() {
        assert!(parse(&["add", "p1"]).needs_start());
        assert!(parse(&["checkout"]).needs_start());
        assert!(!parse(&["orders"]).needs_start());
        assert!(!parse(&["products"]).needs_start());
    }
}
