/// ssh-bip39 library crate — exposes the core modules for integration tests.
///
/// The mnemonic and container codecs are pure transformations over in-memory
/// buffers; `tests/` exercises them end to end via `use ssh_bip39::...`.
pub mod container;
pub mod crypto;
pub mod error;
pub mod keys;
pub mod mnemonic;
