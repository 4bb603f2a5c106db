//! Line-oriented storefront shell

use std::{future, io};

use jiff::tz::TimeZone;
use thiserror::Error;
use tokio::{
    io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt},
    time::{Instant, sleep_until},
};
use tracing::{debug, warn};

use trolley::{
    catalog::Catalog,
    products::ProductId,
    session::{NOTICE_TIMEOUT, NoticeId},
    storage::KeyValueStore,
    storefront::Storefront,
};

use crate::render;

const HELP: &str = "\
Commands:
  add <id> <qty>    add a product to the cart
  remove <id>       remove a product from the cart
  discount <code>   apply a discount code
  take              add the recommended product
  cart              show the cart
  help              show this help
  quit              leave the storefront
";

/// Errors parsing a shell command.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    /// Blank line
    #[error("no command given")]
    Empty,

    /// Unrecognised command word
    #[error("unknown command {0:?}, type `help` for a list")]
    Unknown(String),

    /// A required argument was left out
    #[error("`{command}` needs a {argument}")]
    MissingArgument {
        /// Command being parsed
        command: &'static str,

        /// Name of the missing argument
        argument: &'static str,
    },
}

/// A parsed shell command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Add a product by id and quantity, both unparsed
    Add {
        /// Product id as typed
        product_id: String,

        /// Quantity as typed
        quantity: String,
    },

    /// Remove a product by id, unparsed
    Remove(String),

    /// Apply a discount code
    Discount(String),

    /// Add the recommended product
    Take,

    /// Show the cart
    Cart,

    /// Click the storefront title
    Title,

    /// Show help
    Help,

    /// Leave the shell
    Quit,
}

impl Command {
    /// Parse one input line.
    ///
    /// # Errors
    ///
    /// Returns a `CommandError` for blank lines, unknown commands or missing arguments.
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let mut words = line.split_whitespace();

        let Some(word) = words.next() else {
            return Err(CommandError::Empty);
        };

        let mut next_arg = |command: &'static str, argument: &'static str| {
            words
                .next()
                .map(str::to_string)
                .ok_or(CommandError::MissingArgument { command, argument })
        };

        match word.to_lowercase().as_str() {
            "add" => Ok(Self::Add {
                product_id: next_arg("add", "product id")?,
                quantity: next_arg("add", "quantity")?,
            }),
            "remove" => Ok(Self::Remove(next_arg("remove", "product id")?)),
            "discount" => Ok(Self::Discount(next_arg("discount", "code")?)),
            "take" => Ok(Self::Take),
            "cart" => Ok(Self::Cart),
            "title" => Ok(Self::Title),
            "help" => Ok(Self::Help),
            "quit" | "exit" => Ok(Self::Quit),
            other => Err(CommandError::Unknown(other.to_string())),
        }
    }
}

/// Clears the notice on screen once its time is up.
#[derive(Debug, Default)]
pub struct NoticeTimer {
    armed: Option<(NoticeId, Instant)>,
}

impl NoticeTimer {
    /// Start the countdown for notice `id`, replacing any earlier one.
    pub fn arm(&mut self, id: NoticeId) {
        self.armed = Some((id, Instant::now() + NOTICE_TIMEOUT));
    }

    /// The notice currently counting down.
    pub fn armed_for(&self) -> Option<NoticeId> {
        self.armed.map(|(id, _)| id)
    }

    /// Stop counting down.
    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Resolve with the notice id once its deadline passes. Never resolves
    /// while disarmed.
    pub async fn expired(&self) -> NoticeId {
        match self.armed {
            Some((id, deadline)) => {
                sleep_until(deadline).await;
                id
            }
            None => future::pending().await,
        }
    }
}

/// What the shell should do after a command.
enum Flow {
    Continue,
    Quit,
}

/// Run the shell until `quit` or end of input.
///
/// # Errors
///
/// Returns an IO error if reading input or writing output fails.
pub async fn run<C, S, R, W>(
    storefront: &mut Storefront<C, S>,
    input: R,
    mut out: W,
    tz: &TimeZone,
) -> io::Result<()>
where
    C: Catalog,
    S: KeyValueStore,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = input.lines();
    let mut timer = NoticeTimer::default();

    out.write_all(render::header(storefront.session(), tz).as_bytes())
        .await?;
    show_cart(storefront, &mut out).await?;
    out.write_all(b"Type `help` for commands.\n").await?;

    loop {
        out.write_all(b"> ").await?;
        out.flush().await?;

        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else {
                    break;
                };

                if let Flow::Quit = handle_line(storefront, &line, &mut out).await? {
                    break;
                }

                show_new_notice(storefront, &mut timer, &mut out).await?;
            }
            id = timer.expired() => {
                debug!(?id, "notice timed out");

                storefront.dismiss_notice(id);
                timer.disarm();

                out.write_all(b"\n").await?;
            }
        }
    }

    out.write_all(b"Bye!\n").await?;
    out.flush().await
}

async fn handle_line<C, S, W>(
    storefront: &mut Storefront<C, S>,
    line: &str,
    out: &mut W,
) -> io::Result<Flow>
where
    C: Catalog,
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    let command = match Command::parse(line) {
        Ok(command) => command,
        Err(CommandError::Empty) => return Ok(Flow::Continue),
        Err(error) => {
            out.write_all(format!("{error}\n").as_bytes()).await?;
            return Ok(Flow::Continue);
        }
    };

    match command {
        Command::Add {
            product_id,
            quantity,
        } => {
            if storefront.add_item(&product_id, &quantity).await.is_ok() {
                show_cart(storefront, out).await?;
                show_recommendation(storefront, out).await?;
            }
        }
        Command::Remove(product_id) => match product_id.parse::<ProductId>() {
            Ok(id) => {
                storefront.remove_item(id);
                show_cart(storefront, out).await?;
            }
            Err(error) => {
                out.write_all(format!("{error}\n").as_bytes()).await?;
            }
        },
        Command::Discount(code) => {
            if let Ok(applied) = storefront.apply_discount(&code) {
                out.write_all(format!("Applied {applied}\n").as_bytes())
                    .await?;
                show_cart(storefront, out).await?;
            }
        }
        Command::Take => match storefront.add_recommended().await {
            Ok(()) => {
                show_cart(storefront, out).await?;
                show_recommendation(storefront, out).await?;
            }
            Err(error) => {
                if storefront.notice().is_none() {
                    out.write_all(format!("{error}\n").as_bytes()).await?;
                }
            }
        },
        Command::Cart => {
            show_cart(storefront, out).await?;
            show_recommendation(storefront, out).await?;
        }
        Command::Title => {
            storefront.click_title();
        }
        Command::Help => out.write_all(HELP.as_bytes()).await?,
        Command::Quit => return Ok(Flow::Quit),
    }

    Ok(Flow::Continue)
}

async fn show_cart<C, S, W>(storefront: &Storefront<C, S>, out: &mut W) -> io::Result<()>
where
    C: Catalog,
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    match render::cart(storefront.session(), storefront.currency()) {
        Ok(rendered) => out.write_all(rendered.as_bytes()).await,
        Err(error) => {
            warn!("failed to render cart totals: {error}");
            out.write_all(b"Cart totals are unavailable.\n").await
        }
    }
}

async fn show_recommendation<C, S, W>(storefront: &Storefront<C, S>, out: &mut W) -> io::Result<()>
where
    C: Catalog,
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    match storefront.session().recommendation() {
        Some(product) => {
            out.write_all(render::recommendation(product, storefront.currency()).as_bytes())
                .await
        }
        None => Ok(()),
    }
}

async fn show_new_notice<C, S, W>(
    storefront: &Storefront<C, S>,
    timer: &mut NoticeTimer,
    out: &mut W,
) -> io::Result<()>
where
    C: Catalog,
    S: KeyValueStore,
    W: AsyncWrite + Unpin,
{
    let Some(notice) = storefront.notice() else {
        return Ok(());
    };

    if timer.armed_for() == Some(notice.id) {
        return Ok(());
    }

    timer.arm(notice.id);

    out.write_all(render::notice(notice).as_bytes()).await
}
