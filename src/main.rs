mod logging;

use std::{
    fs,
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result, bail};
use clap::{ArgGroup, Parser};
use reqwest::Url;
use slackhook::{Attachment, Color, Field, Message, WebhookClient, improve_json_error};

/// Post a message to a Slack Incoming WebHook
#[derive(Parser)]
#[command(group(ArgGroup::new("content").required(true).args(["text", "message"])))]
struct Args {
    /// The message text
    text: Option<String>,

    /// Read the whole message from a JSON file instead (`-` for stdin)
    #[arg(short, long, value_name = "FILE")]
    message: Option<PathBuf>,

    /// The WebHook URL the message is posted to
    #[arg(short, long, env = "SLACK_HOOK", hide_env_values = true, value_parser = parse_hook_url)]
    url: Url,

    /// Override the channel configured for the hook
    #[arg(short, long)]
    channel: Option<String>,

    /// Override the bot name
    #[arg(short = 'n', long)]
    username: Option<String>,

    /// Image to use as the bot icon
    #[arg(long, conflicts_with = "icon_emoji")]
    icon_url: Option<String>,

    /// Emoji to use as the bot icon, e.g. `:ghost:`
    #[arg(long)]
    icon_emoji: Option<String>,

    #[command(flatten)]
    attachment: AttachmentArgs,

    /// Give up on the request after this many seconds
    #[arg(long, default_value_t = 10)]
    timeout: u64,

    /// Log more (repeatable)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only log warnings and errors
    #[arg(short, long, conflicts_with = "verbose")]
    quiet: bool,
}

/// Options describing one attachment; it is only added if any are given
#[derive(clap::Args)]
struct AttachmentArgs {
    /// `good`, `warning`, `danger` or a hex color like `#439FE0`
    #[arg(long)]
    color: Option<Color>,

    /// Plain text summary of the attachment
    #[arg(long)]
    fallback: Option<String>,

    #[arg(long)]
    title: Option<String>,

    #[arg(long, requires = "title")]
    title_link: Option<String>,

    /// Body text of the attachment
    #[arg(long)]
    attachment_text: Option<String>,

    #[arg(long)]
    author_name: Option<String>,

    #[arg(long, requires = "author_name")]
    author_link: Option<String>,

    /// Small icon shown next to the author name
    #[arg(long, requires = "author_name")]
    author_icon: Option<String>,

    #[arg(long)]
    image_url: Option<String>,

    /// Small image shown on the right of the attachment
    #[arg(long)]
    thumb_url: Option<String>,

    #[arg(long)]
    footer: Option<String>,

    #[arg(long, requires = "footer")]
    footer_icon: Option<String>,

    /// Add a field (repeatable)
    #[arg(short, long = "field", value_name = "TITLE=VALUE", value_parser = parse_field)]
    fields: Vec<Field>,

    /// Mark all fields as short enough to be shown side by side
    #[arg(long, requires = "fields")]
    short_fields: bool,

    /// Stamp the attachment with the current time
    #[arg(long)]
    timestamp: bool,
}

impl AttachmentArgs {
    fn into_attachment(self) -> Option<Attachment> {
        let Self {
            color,
            fallback,
            title,
            title_link,
            attachment_text,
            author_name,
            author_link,
            author_icon,
            image_url,
            thumb_url,
            footer,
            footer_icon,
            fields,
            short_fields,
            timestamp,
        } = self;

        let is_empty = color.is_none()
            && fallback.is_none()
            && title.is_none()
            && attachment_text.is_none()
            && author_name.is_none()
            && image_url.is_none()
            && thumb_url.is_none()
            && footer.is_none()
            && fields.is_empty()
            && !timestamp;
        if is_empty {
            return None;
        }

        let mut attachment = Attachment {
            color,
            fallback: fallback.unwrap_or_default(),
            title: title.unwrap_or_default(),
            title_link: title_link.unwrap_or_default(),
            text: attachment_text.unwrap_or_default(),
            author_name: author_name.unwrap_or_default(),
            author_link: author_link.unwrap_or_default(),
            author_icon: author_icon.unwrap_or_default(),
            image_url: image_url.unwrap_or_default(),
            thumb_url: thumb_url.unwrap_or_default(),
            footer: footer.unwrap_or_default(),
            footer_icon: footer_icon.unwrap_or_default(),
            ..Attachment::default()
        };
        for field in fields {
            attachment.add_field(if short_fields { field.short() } else { field });
        }
        if timestamp {
            attachment.set_timestamp_now();
        }
        Some(attachment)
    }
}

impl Args {
    fn build_message(self) -> Result<Message> {
        let mut message = match (self.text, self.message) {
            (_, Some(path)) => read_message(&path)?,
            (Some(text), None) => Message::new(text),
            (None, None) => bail!("Neither message text nor message file given"),
        };

        if let Some(channel) = self.channel {
            message.channel = channel;
        }
        if let Some(username) = self.username {
            message.user_name = username;
        }
        if let Some(icon_url) = self.icon_url {
            message.icon_url = icon_url;
        }
        if let Some(icon_emoji) = self.icon_emoji {
            message.icon_emoji = icon_emoji;
        }
        if let Some(attachment) = self.attachment.into_attachment() {
            message.attach(attachment);
        }
        Ok(message)
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose, args.quiet);

    let timeout = Duration::from_secs(args.timeout);
    let target: String = redact(&args.url);
    let client = WebhookClient::with_timeout(args.url.as_str(), timeout)
        .context("Could not create HTTP client")?;
    let message: Message = args.build_message()?;

    log::info!("Sending message to {target}");
    client.send(&message).context("Could not send message")?;
    log::info!("Message delivered");
    Ok(())
}

fn read_message(path: &Path) -> Result<Message> {
    let json: String = if path.as_os_str() == "-" {
        std::io::read_to_string(std::io::stdin()).context("Could not read message from stdin")?
    } else {
        fs::read_to_string(path)
            .with_context(|| format!("Could not read message file {}", path.display()))?
    };
    let message: Message = serde_json::from_str(&json)
        .map_err(|e| improve_json_error(&e, &json))
        .with_context(|| format!("Could not parse message from {}", path.display()))?;
    Ok(message)
}

fn parse_hook_url(s: &str) -> Result<Url> {
    let url = Url::parse(s).context("Invalid WebHook URL")?;
    if !matches!(url.scheme(), "http" | "https") {
        bail!("URL scheme is {:?} instead of \"https\"", url.scheme());
    }
    if url.host_str().is_none_or(str::is_empty) {
        bail!("URL has no host");
    }
    Ok(url)
}

fn parse_field(s: &str) -> Result<Field> {
    let Some((title, value)) = s.split_once('=') else {
        bail!("Expected TITLE=VALUE, got {s:?}");
    };
    Ok(Field::new(title.trim(), value.trim()))
}

/// Hook URLs embed their secret in the path; only the host is safe to print
fn redact(url: &Url) -> String {
    format!("{}://{}/...", url.scheme(), url.host_str().unwrap_or(""))
}
