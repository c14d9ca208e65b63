//! Signed-in user profile shown in the header.
//!
//! There is no identity backend; the profile resolves to a fixed user after
//! a configurable delay so the header's loading state is visible.

use std::time::Duration;
use tokio::sync::mpsc;

/// Display name and role.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    /// Full name.
    pub name: String,
    /// Role label.
    pub role: String,
}

impl Profile {
    /// The console's operator account.
    pub fn operator() -> Self {
        Self {
            name: "Carlos Ruiz".to_string(),
            role: "Admin".to_string(),
        }
    }
}

/// Header state of the profile.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum ProfileState {
    /// Still waiting.
    #[default]
    Loading,
    /// Resolved.
    Ready(Profile),
}

impl ProfileState {
    /// Header text.
    pub fn label(&self) -> String {
        match self {
            ProfileState::Loading => "Loading profile…".to_string(),
            ProfileState::Ready(p) => format!("{} / {}", p.name, p.role),
        }
    }
}

/// Resolves the profile after `delay`.
pub async fn load_profile(delay: Duration) -> Profile {
    tokio::time::sleep(delay).await;
    Profile::operator()
}

/// Spawns [`load_profile`] and delivers the result on `tx`.
pub fn spawn_profile_load(delay: Duration, tx: mpsc::Sender<Profile>) {
    tokio::spawn(async move {
        let profile = load_profile(delay).await;
        if tx.send(profile).await.is_err() {
            tracing::debug!("profile loaded after the UI closed");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(ProfileState::Loading.label(), "Loading profile…");
        assert_eq!(
            ProfileState::Ready(Profile::operator()).label(),
            "Carlos Ruiz / Admin"
        );
    }

    #[tokio::test(start_paused = true)]
    async fn profile_arrives_after_delay() {
        let (tx, mut rx) = mpsc::channel(1);
        spawn_profile_load(Duration::from_secs(3), tx);

        tokio::time::sleep(Duration::from_millis(2999)).await;
        assert!(rx.try_recv().is_err(), "still loading");

        tokio::time::sleep(Duration::from_millis(1)).await;
        let profile = rx.recv().await.expect("delivered");
        assert_eq!(profile, Profile::operator());
    }

    #[tokio::test(start_paused = true)]
    async fn dropped_receiver_is_not_an_error() {
        let (tx, rx) = mpsc::channel(1);
        drop(rx);
        spawn_profile_load(Duration::ZERO, tx);
        tokio::time::sleep(Duration::from_millis(10)).await;
    }
}
