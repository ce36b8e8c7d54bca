// ── Cart sessions ──
//
// One small TOML file per profile remembering the cart id, so a cart created
// by `getaway cart add` survives into the next invocation. A session written
// for a different shop URL is ignored.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::{ConfigError, data_dir};

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
pub struct Session {
    /// Shop the cart belongs to.
    pub shop: String,
    pub cart_id: Option<String>,
}

impl Session {
    pub fn new(shop: impl Into<String>, cart_id: Option<String>) -> Self {
        Self {
            shop: shop.into(),
            cart_id,
        }
    }

    /// The stored cart id, if it was created against `shop`.
    pub fn cart_for(&self, shop: &str) -> Option<&str> {
        if self.shop == shop {
            self.cart_id.as_deref()
        } else {
            debug!(stored = %self.shop, shop, "session belongs to another shop");
            None
        }
    }
}

/// `<data dir>/sessions`.
pub fn sessions_dir() -> PathBuf {
    data_dir().join("sessions")
}

/// Session file for `profile` under `dir`. Path separators and other odd
/// characters in the profile name are flattened to `_`.
pub fn session_path_in(dir: &Path, profile: &str) -> PathBuf {
    let name: String = profile
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    dir.join(format!("{name}.toml"))
}

pub fn session_path(profile: &str) -> PathBuf {
    session_path_in(&sessions_dir(), profile)
}

/// Read a session file. A missing or unreadable file is no session.
pub fn load_session_from(path: &Path) -> Option<Session> {
    let raw = std::fs::read_to_string(path).ok()?;
    match toml::from_str(&raw) {
        Ok(session) => Some(session),
        Err(e) => {
            warn!(path = %path.display(), "ignoring unreadable session: {e}");
            None
        }
    }
}

pub fn save_session_to(path: &Path, session: &Session) -> Result<(), ConfigError> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, toml::to_string_pretty(session)?)?;
    debug!(path = %path.display(), "session saved");
    Ok(())
}

/// Delete a session file. Already gone is fine.
pub fn clear_session_at(path: &Path) -> Result<(), ConfigError> {
    match std::fs::remove_file(path) {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
        Err(e) => Err(e.into()),
    }
}

/// Drop the session at `path` if it belongs to `shop`. A session written
/// for another shop is left alone.
pub fn forget_cart_at(path: &Path, shop: &str) -> Result<(), ConfigError> {
    match load_session_from(path) {
        Some(session) if session.shop == shop => clear_session_at(path),
        Some(session) => {
            debug!(stored = %session.shop, shop, "keeping another shop's session");
            Ok(())
        }
        None => Ok(()),
    }
}

pub fn load_session(profile: &str) -> Option<Session> {
    load_session_from(&session_path(profile))
}

pub fn save_session(profile: &str, session: &Session) -> Result<(), ConfigError> {
    save_session_to(&session_path(profile), session)
}

pub fn forget_cart(profile: &str, shop: &str) -> Result<(), ConfigError> {
    forget_cart_at(&session_path(profile), shop)
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    const SHOP: &str = "https://getaway.myshopify.com/";

    #[test]
    fn save_load_clear() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path_in(dir.path(), "default");
        assert_eq!(load_session_from(&path), None);

        let session = Session::new(SHOP, Some("gid://shopify/Cart/c1".into()));
        save_session_to(&path, &session).unwrap();
        assert_eq!(load_session_from(&path), Some(session));

        clear_session_at(&path).unwrap();
        assert_eq!(load_session_from(&path), None);
        // Clearing twice is not an error.
        clear_session_at(&path).unwrap();
    }

    #[test]
    fn cart_only_for_matching_shop() {
        let session = Session::new(SHOP, Some("c1".into()));
        assert_eq!(session.cart_for(SHOP), Some("c1"));
        assert_eq!(session.cart_for("https://other.myshopify.com/"), None);
    }

    #[test]
    fn forgetting_keeps_another_shops_session() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path_in(dir.path(), "default");
        let session = Session::new(SHOP, Some("c1".into()));
        save_session_to(&path, &session).unwrap();

        forget_cart_at(&path, "https://other.myshopify.com/").unwrap();
        assert_eq!(load_session_from(&path), Some(session));

        forget_cart_at(&path, SHOP).unwrap();
        assert_eq!(load_session_from(&path), None);
        // Nothing stored is fine too.
        forget_cart_at(&path, SHOP).unwrap();
    }

    #[test]
    fn garbage_session_is_ignored() {
        let dir = tempfile::tempdir().unwrap();
        let path = session_path_in(dir.path(), "default");
        std::fs::write(&path, "cart_id = [not toml").unwrap();
        assert_eq!(load_session_from(&path), None);
    }

    #[test]
    fn profile_names_are_flattened() {
        let dir = Path::new("/tmp/sessions");
        assert_eq!(
            session_path_in(dir, "team/live shop"),
            dir.join("team_live_shop.toml")
        );
    }
}
