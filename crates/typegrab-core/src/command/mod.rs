//! Command module: The copy commands and their collaborators
//!
//! Every failure is caught here and turned into a notification; nothing
//! escapes to the host.

mod copier;
mod editor;
mod error;

pub use copier::{CommandKind, CommandOutcome, CopierConfig, TypeCopier};
pub use editor::{Clipboard, EditorSnapshot, Notifier, Target, word_at};
pub use error::CopyTypeError;

#[cfg(test)]
mod tests;
