//! Interactive shell.
//!
//! Reads one command per line and keeps the storefront between them, so the
//! cart drawer, the open product and the review form persist across lines.

use std::io::Write;

use clap::{Parser, Subcommand};
use shopease_storefront::Storefront;
use shopease_storefront::api::Backend;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::debug;

use super::{CliError, Command};

const PROMPT: &str = "shopease> ";

#[derive(Parser)]
#[command(name = "shopease", no_binary_name = true, disable_version_flag = true)]
struct ShellLine {
    #[command(subcommand)]
    command: ShellCommand,
}

#[derive(Subcommand)]
enum ShellCommand {
    #[command(flatten)]
    Store(Command),
    /// Close the cart drawer and the product panel
    Close,
    /// Leave the shell
    #[command(alias = "quit")]
    Exit,
}

/// Error splitting a shell line into words.
#[derive(Debug, PartialEq, Eq)]
struct UnterminatedQuote;

/// Run the shell until `exit` or end of input.
///
/// Command failures are printed and the shell keeps going; only output
/// errors end it.
///
/// # Errors
///
/// Returns `CliError::Io` if reading input or writing output fails.
pub async fn run<B: Backend>(
    storefront: &mut Storefront<B>,
    input: impl AsyncBufRead + Unpin,
    out: &mut impl Write,
) -> Result<(), CliError> {
    let mut lines = input.lines();

    loop {
        write!(out, "{PROMPT}")?;
        out.flush()?;

        let Some(line) = lines.next_line().await? else {
            writeln!(out)?;
            break;
        };

        let words = match split_words(&line) {
            Ok(words) if words.is_empty() => continue,
            Ok(words) => words,
            Err(UnterminatedQuote) => {
                writeln!(out, "error: unterminated quote")?;
                continue;
            }
        };

        let command = match ShellLine::try_parse_from(&words) {
            Ok(parsed) => parsed.command,
            Err(e) => {
                write!(out, "{}", e.render())?;
                continue;
            }
        };

        match command {
            ShellCommand::Exit => break,
            ShellCommand::Close => {
                storefront.close_cart();
                storefront.close_product();
            }
            ShellCommand::Store(command) => match super::run(storefront, command, out).await {
                Ok(()) => {}
                Err(CliError::Storefront(e)) => {
                    debug!(error = %e, "Shell command failed");
                    writeln!(out, "error: {e}")?;
                }
                Err(e) => return Err(e),
            },
        }
    }

    Ok(())
}

/// Split a line on whitespace, keeping single- or double-quoted runs
/// together.
fn split_words(line: &str) -> Result<Vec<String>, UnterminatedQuote> {
    let mut words = Vec::new();
    let mut current = String::new();
    let mut in_word = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_word = true;
            }
            None if c.is_whitespace() => {
                if in_word {
                    words.push(std::mem::take(&mut current));
                    in_word = false;
                }
            }
            None => {
                current.push(c);
                in_word = true;
            }
        }
    }

    if quote.is_some() {
        return Err(UnterminatedQuote);
    }
    if in_word {
        words.push(current);
    }
    Ok(words)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopease_core::SessionId;
    use shopease_storefront::api::BackendClient;
    use shopease_storefront::config::StorefrontConfig;

    use super::*;

    #[test]
    fn test_split_words() {
        assert_eq!(split_words("  add   p1 ").unwrap(), ["add", "p1"]);
        assert_eq!(
            split_words(r#"review p1 --comment "fits well" -n 'Ana B'"#).unwrap(),
            ["review", "p1", "--comment", "fits well", "-n", "Ana B"]
        );
        assert_eq!(split_words(r#"review p1 -n """#).unwrap(), ["review", "p1", "-n", ""]);
        assert!(split_words("").unwrap().is_empty());
        assert_eq!(split_words("review \"oops"), Err(UnterminatedQuote));
    }

    /// A storefront whose backend refuses every connection.
    fn offline_storefront() -> Storefront<BackendClient> {
        let config = StorefrontConfig::for_backend("http://127.0.0.1:9").unwrap();
        Storefront::new(BackendClient::new(&config), SessionId::new("shell-session"))
    }

    async fn run_script(script: &str) -> String {
        let mut storefront = offline_storefront();
        let mut out = Vec::new();
        run(&mut storefront, script.as_bytes(), &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_session_then_exit() {
        let output = run_script("session\nexit\nsession\n").await;
        assert_eq!(output.matches("shell-session").count(), 1);
        assert!(output.starts_with(PROMPT));
    }

    #[tokio::test]
    async fn test_errors_do_not_end_the_shell() {
        let output = run_script("frobnicate\nadd p9\nreview \"x\nsession\n").await;
        assert!(output.contains("error:"));
        assert!(output.contains("Not found: product p9"));
        assert!(output.contains("unterminated quote"));
        assert!(output.contains("shell-session"));
    }

    #[tokio::test]
    async fn test_offline_views_degrade() {
        let output = run_script("orders\ncart\ncheckout\n").await;
        assert!(output.contains("No orders yet."));
        assert!(output.contains("Your cart is empty."));
        assert!(output.contains("Nothing to check out."));
    }
}
