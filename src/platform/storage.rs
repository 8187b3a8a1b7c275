//! LocalStorage access

use web_sys::Storage;

/// The page's LocalStorage, if the browser allows it
pub fn local_storage() -> Option<Storage> {
    web_sys::window()
        .and_then(|w| w.local_storage().ok())
        .flatten()
}
