//! Local attachment materialization
//!
//! Issue attachments are mirrored on disk under
//! `{root}/{issue_key}/{filename}`. Path existence is the sole source of
//! truth for "already materialized"; there is no manifest, checksum, TTL, or
//! invalidation. See [`store::AttachmentStore`] for the caveats that follow
//! from that.

/// Inline content encoding for transport
pub mod content;
/// The on-disk store
pub mod store;

pub use content::{encode_for_transport, EncodedContent, TransportEncoding};
pub use store::{
    AttachmentStore, ContentFetcher, DownloadFailure, DownloadReport, DownloadedAttachment,
    KnownAttachment, StoredAttachment,
};
