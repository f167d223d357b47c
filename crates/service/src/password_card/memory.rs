use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use models::PasswordCard;

use crate::errors::StoreError;
use crate::password_card::repository::PasswordCardRepository;

/// In-memory password card store.
///
/// Cards live in a `Vec` in insertion order behind one lock. Writers hold the
/// write guard across the whole scan-then-mutate step, so concurrent inserts,
/// updates and deletes behave as if run one after another. `list` takes the
/// read guard and hands back a cloned snapshot.
///
/// Uniqueness is enforced by linear scan; fine for the handful of cards a
/// single user keeps.
#[derive(Debug, Default)]
pub struct InMemoryPasswordCardRepository {
    cards: RwLock<Vec<PasswordCard>>,
}

impl InMemoryPasswordCardRepository {
    pub fn new() -> Self {
        Self::with_cards(Vec::new())
    }

    /// Start from an existing collection. Uniqueness of the seed is the caller's job.
    pub fn with_cards(cards: Vec<PasswordCard>) -> Self {
        Self { cards: RwLock::new(cards) }
    }

    fn read(&self) -> Result<RwLockReadGuard<'_, Vec<PasswordCard>>, StoreError> {
        self.cards.read().map_err(|_| StoreError::Poisoned)
    }

    fn write(&self) -> Result<RwLockWriteGuard<'_, Vec<PasswordCard>>, StoreError> {
        self.cards.write().map_err(|_| StoreError::Poisoned)
    }
}

impl PasswordCardRepository for InMemoryPasswordCardRepository {
    fn insert(&self, card: PasswordCard) -> Result<(), StoreError> {
        let mut cards = self.write()?;
        if cards.iter().any(|c| c.id == card.id) {
            return Err(StoreError::id_exists(card.id));
        }
        if cards.iter().any(|c| c.url == card.url) {
            return Err(StoreError::url_exists(card.url));
        }
        cards.push(card);
        Ok(())
    }

    fn update(&self, card: PasswordCard) -> Result<(), StoreError> {
        let mut cards = self.write()?;
        if cards.iter().any(|c| c.id != card.id && c.url == card.url) {
            return Err(StoreError::url_exists(card.url));
        }
        match cards.iter_mut().find(|c| c.id == card.id) {
            Some(slot) => {
                *slot = card;
                Ok(())
            }
            None => Err(StoreError::not_found(card.id)),
        }
    }

    fn delete(&self, id: &str) -> Result<(), StoreError> {
        let mut cards = self.write()?;
        let pos = cards
            .iter()
            .position(|c| c.id == id)
            .ok_or_else(|| StoreError::not_found(id))?;
        cards.remove(pos);
        Ok(())
    }

    fn list(&self) -> Result<Vec<PasswordCard>, StoreError> {
        Ok(self.read()?.clone())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;
    use std::thread;

    use super::*;

    fn card(id: &str, name: &str, url: &str) -> PasswordCard {
        PasswordCard {
            id: id.into(),
            name: name.into(),
            username: "username".into(),
            password: "supersecret".into(),
            url: url.into(),
        }
    }

    fn aws() -> PasswordCard {
        card("card-id-1", "AWS", "https://aws.com/login")
    }

    fn gcp() -> PasswordCard {
        card("card-id-2", "Google Cloud Platform", "https://cloud.google.com/")
    }

    #[test]
    fn insert_rejects_duplicate_id() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws()]);
        let err = repo.insert(aws()).unwrap_err();
        assert_eq!(err, StoreError::id_exists("card-id-1"));
        assert_eq!(repo.list().unwrap(), vec![aws()]);
    }

    #[test]
    fn insert_rejects_duplicate_url() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws()]);
        let err = repo.insert(card("card-id-2", "AWS", "https://aws.com/login")).unwrap_err();
        assert_eq!(err, StoreError::url_exists("https://aws.com/login"));
        assert_eq!(repo.list().unwrap(), vec![aws()]);
    }

    #[test]
    fn insert_reports_id_before_url_across_entries() {
        // first card owns the url, second card owns the id
        let repo = InMemoryPasswordCardRepository::with_cards(vec![
            card("a", "A", "https://shared.example.com"),
            card("b", "B", "https://b.example.com"),
        ]);
        let err = repo.insert(card("b", "C", "https://shared.example.com")).unwrap_err();
        assert_eq!(err, StoreError::id_exists("b"));
    }

    #[test]
    fn insert_appends_in_order() {
        let repo = InMemoryPasswordCardRepository::new();
        assert!(repo.list().unwrap().is_empty());
        repo.insert(aws()).unwrap();
        repo.insert(gcp()).unwrap();
        assert_eq!(repo.list().unwrap(), vec![aws(), gcp()]);
    }

    #[test]
    fn update_rejects_url_owned_by_another_card() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws(), gcp()]);
        let mut changed = gcp();
        changed.url = aws().url;
        let err = repo.update(changed).unwrap_err();
        assert_eq!(err, StoreError::url_exists("https://aws.com/login"));
        assert_eq!(repo.list().unwrap(), vec![aws(), gcp()]);
    }

    #[test]
    fn update_checks_conflicts_after_the_target_too() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws(), gcp()]);
        let mut changed = aws();
        changed.url = gcp().url;
        assert_eq!(
            repo.update(changed).unwrap_err(),
            StoreError::url_exists("https://cloud.google.com/")
        );
    }

    #[test]
    fn update_unknown_id_is_not_found() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws(), gcp()]);
        let err = repo.update(card("c3", "Other", "https://other.example.com")).unwrap_err();
        assert_eq!(err, StoreError::not_found("c3"));
    }

    #[test]
    fn update_unknown_id_with_colliding_url_reports_conflict() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws()]);
        let err = repo.update(card("c3", "Other", "https://aws.com/login")).unwrap_err();
        assert_eq!(err, StoreError::url_exists("https://aws.com/login"));
    }

    #[test]
    fn update_replaces_in_place() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws(), gcp()]);
        let changed = card("card-id-1", "Amazon Web Services", "https://console.aws.amazon.com/");
        repo.update(changed.clone()).unwrap();
        assert_eq!(repo.list().unwrap(), vec![changed, gcp()]);

        // keeping its own url is not a conflict
        let mut same_url = gcp();
        same_url.username = "other".into();
        repo.update(same_url.clone()).unwrap();
        assert_eq!(repo.list().unwrap()[1], same_url);
    }

    #[test]
    fn delete_preserves_order_of_survivors() {
        let third = card("card-id-3", "GitHub", "https://github.com/login");
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws(), gcp(), third.clone()]);
        repo.delete("card-id-2").unwrap();
        assert_eq!(repo.list().unwrap(), vec![aws(), third]);
    }

    #[test]
    fn delete_unknown_id_leaves_collection_unchanged() {
        let repo = InMemoryPasswordCardRepository::with_cards(vec![aws()]);
        assert_eq!(repo.delete("nope").unwrap_err(), StoreError::not_found("nope"));
        assert_eq!(repo.list().unwrap(), vec![aws()]);
    }

    #[test]
    fn concurrent_disjoint_inserts_all_land() {
        let repo = Arc::new(InMemoryPasswordCardRepository::new());
        let handles: Vec<_> = (0..16)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let url = format!("https://{i}.example.com");
                thread::spawn(move || repo.insert(card(&format!("id-{i}"), "n", &url)))
            })
            .collect();
        for h in handles {
            h.join().unwrap().unwrap();
        }
        let mut ids: Vec<_> = repo.list().unwrap().into_iter().map(|c| c.id).collect();
        ids.sort();
        let mut expected: Vec<_> = (0..16).map(|i| format!("id-{i}")).collect();
        expected.sort();
        assert_eq!(ids, expected);
    }

    #[test]
    fn concurrent_inserts_of_same_url_have_one_winner() {
        let repo = Arc::new(InMemoryPasswordCardRepository::new());
        let handles: Vec<_> = (0..8)
            .map(|i| {
                let repo = Arc::clone(&repo);
                let id = format!("id-{i}");
                thread::spawn(move || repo.insert(card(&id, "n", "https://aws.com/login")))
            })
            .collect();
        let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        assert_eq!(results.iter().filter(|r| r.is_ok()).count(), 1);
        for err in results.into_iter().filter_map(Result::err) {
            assert_eq!(err, StoreError::url_exists("https://aws.com/login"));
        }
        assert_eq!(repo.list().unwrap().len(), 1);
    }
}
