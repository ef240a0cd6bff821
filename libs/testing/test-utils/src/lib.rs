//! Fixtures shared by the workspace's integration tests.
//!
//! With the `postgres` feature, [`TestDatabase`] starts a migrated Postgres
//! container. [`TestDataBuilder`] hands out names and emails that cannot
//! collide between tests sharing one database.

use uuid::Uuid;

#[cfg(feature = "postgres")]
mod postgres;

#[cfg(feature = "postgres")]
pub use postgres::TestDatabase;

/// Ids of the groups inserted by the seed migration, in name order.
pub mod seeded_groups {
    use migration::seed::GROUPS;
    use uuid::Uuid;

    pub const ADMINISTRATORS: Uuid = GROUPS[0].id;
    pub const ARCHITECTS: Uuid = GROUPS[1].id;
    pub const ENGINEERS: Uuid = GROUPS[2].id;
    pub const PROJECT_OWNERS: Uuid = GROUPS[3].id;

    pub const ALL: [Uuid; 4] = [ADMINISTRATORS, ARCHITECTS, ENGINEERS, PROJECT_OWNERS];
}

/// Per-test data namespace.
///
/// ```
/// use test_utils::TestDataBuilder;
///
/// let data = TestDataBuilder::new(7);
/// assert_eq!(data.email("alice"), "alice-7@example.com");
/// assert_eq!(data.name("alice"), "Test alice 7");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TestDataBuilder {
    seed: u64,
}

impl TestDataBuilder {
    pub const fn new(seed: u64) -> Self {
        Self { seed }
    }

    /// Seed derived from the test's name, stable across runs.
    pub fn from_test_name(name: &str) -> Self {
        // FNV-1a
        let seed = name.bytes().fold(0xcbf2_9ce4_8422_2325_u64, |hash, byte| {
            (hash ^ u64::from(byte)).wrapping_mul(0x0100_0000_01b3)
        });
        Self::new(seed)
    }

    pub fn name(&self, who: &str) -> String {
        format!("Test {who} {}", self.seed)
    }

    pub fn email(&self, local: &str) -> String {
        format!("{local}-{}@example.com", self.seed)
    }

    pub fn group_name(&self, prefix: &str) -> String {
        format!("{prefix}-{}", self.seed)
    }

    /// A v8 id that no migration or repository ever generates.
    pub fn unknown_id(&self) -> Uuid {
        let mut bytes = [0u8; 16];
        bytes[..8].copy_from_slice(&self.seed.to_be_bytes());
        bytes[8..].copy_from_slice(&(!self.seed).to_be_bytes());
        uuid::Builder::from_custom_bytes(bytes).into_uuid()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_test_name_gives_same_data() {
        let a = TestDataBuilder::from_test_name("creates_user");
        let b = TestDataBuilder::from_test_name("creates_user");
        assert_eq!(a, b);
        assert_eq!(a.email("bob"), b.email("bob"));
        assert_eq!(a.unknown_id(), b.unknown_id());
    }

    #[test]
    fn different_tests_do_not_collide() {
        let a = TestDataBuilder::from_test_name("creates_user");
        let b = TestDataBuilder::from_test_name("rejects_duplicate");
        assert_ne!(a.email("bob"), b.email("bob"));
        assert_ne!(a.group_name("ops"), b.group_name("ops"));
        assert_ne!(a.unknown_id(), b.unknown_id());
    }

    #[test]
    fn unknown_id_never_matches_a_seeded_group() {
        let id = TestDataBuilder::new(1).unknown_id();
        assert_eq!(id.get_version_num(), 8);
        assert!(!seeded_groups::ALL.contains(&id));
    }

    #[test]
    fn seeded_ids_follow_the_migration_names() {
        let names: Vec<_> = migration::seed::GROUPS.iter().map(|g| g.name).collect();
        assert_eq!(
            names,
            ["Administrators", "Architects", "Engineers", "Project owners"]
        );
        assert_eq!(seeded_groups::ENGINEERS, migration::seed::GROUPS[2].id);
    }
}
