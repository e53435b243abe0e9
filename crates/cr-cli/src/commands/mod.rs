pub mod character;
pub mod init;
pub mod list;
pub mod log;
pub mod mutate;
pub mod show;
pub mod todo;

use std::path::Path;

use cr_store::Ledger;

/// Open the ledger rooted at the given directory.
pub fn open(dir: &Path) -> Ledger {
    Ledger::open(dir)
}
