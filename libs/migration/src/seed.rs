//! Rows inserted by the seed migration. The in-memory store and the test
//! fixtures read the same table so every backend exposes identical groups.

use sea_orm::prelude::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedGroup {
    pub id: Uuid,
    pub name: &'static str,
}

/// Default groups, in name order.
pub const GROUPS: [SeedGroup; 4] = [
    SeedGroup {
        id: Uuid::from_u128(0x01958a2e_0000_7000_8000_000000000001),
        name: "Administrators",
    },
    SeedGroup {
        id: Uuid::from_u128(0x01958a2e_0000_7000_8000_000000000002),
        name: "Architects",
    },
    SeedGroup {
        id: Uuid::from_u128(0x01958a2e_0000_7000_8000_000000000003),
        name: "Engineers",
    },
    SeedGroup {
        id: Uuid::from_u128(0x01958a2e_0000_7000_8000_000000000004),
        name: "Project owners",
    },
];
