//! Subcommands, one per gateway operation.

use std::path::PathBuf;

use clap::{Args, Subcommand};
use waapi::{MediaSource, WaapiResult};

/// Available gateway operations.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Send a text message
    Text {
        /// Recipient chat id (e.g. "201234567890@c.us")
        chat_id: String,
        /// Message text
        message: String,
    },

    /// Send an image, video or document
    Media {
        chat_id: String,
        #[command(flatten)]
        source: MediaArgs,
        /// Caption shown under the media
        #[arg(long)]
        caption: Option<String>,
        /// File name shown to the recipient
        #[arg(long)]
        filename: Option<String>,
    },

    /// Send a sticker
    Sticker {
        chat_id: String,
        #[command(flatten)]
        source: MediaArgs,
    },

    /// Send an audio file as a voice note
    Voice {
        chat_id: String,
        #[command(flatten)]
        source: MediaArgs,
    },

    /// Share a location pin
    Location {
        chat_id: String,
        #[arg(long, allow_negative_numbers = true)]
        latitude: f64,
        #[arg(long, allow_negative_numbers = true)]
        longitude: f64,
        /// Place name
        #[arg(long)]
        name: String,
        /// Street address
        #[arg(long)]
        address: String,
    },

    /// Share a contact card
    Contact {
        chat_id: String,
        /// Contact display name
        #[arg(long)]
        name: String,
        /// Contact phone number
        #[arg(long)]
        phone: String,
        #[arg(long)]
        organization: Option<String>,
    },

    /// Send a pre-registered template
    Template {
        chat_id: String,
        template_id: String,
        /// Template substitution, repeat in placeholder order
        #[arg(short = 'p', long = "param")]
        params: Vec<String>,
    },

    /// Show the device connection state
    Status {
        /// Device id (omit on single-device deployments)
        #[arg(long)]
        device_id: Option<String>,
    },

    /// Fetch the device pairing QR code
    Qr {
        /// Device id (omit on single-device deployments)
        #[arg(long)]
        device_id: Option<String>,
    },

    /// Restart the gateway instance
    Reboot,
}

/// Media location: a URL the gateway fetches, or a local file to upload.
#[derive(Args, Debug, Clone, Default)]
pub struct MediaArgs {
    /// Remote media URL
    #[arg(long)]
    pub url: Option<String>,

    /// Local file to upload (wins over --url)
    #[arg(long)]
    pub file: Option<PathBuf>,
}

impl MediaArgs {
    pub fn into_source(self) -> WaapiResult<MediaSource> {
        MediaSource::from_parts(self.url, self.file)
    }
}
