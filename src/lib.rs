pub mod bits;
pub mod error;
pub mod soundbank;
pub mod stream;
pub mod strtable;
pub mod version;

pub use error::{Error, Result};
pub use soundbank::model::SoundBank;
pub use soundbank::property::PropertyEmission;
pub use soundbank::{export_media, BankCodec};
pub use stream::Id;
pub use strtable::{TrieBlock, TrieEntry};
pub use version::FormatVersion;
