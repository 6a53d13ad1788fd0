//! Versioned hook negotiation.
//!
//! Content types declare which version of each versioned hook they implement.
//! Versions listed in [`RETIRED_HOOKS`] belong to signatures the loader no
//! longer calls; a type still declaring one is rejected before it can register
//! anything.

use crate::error::RegistryError;

/// Capability surface a hook belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum HookOwner {
    Mod,
    ModItem,
    GlobalItem,
    ModPlayer,
}

/// Hooks whose signature changed across API revisions.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, strum::Display, strum::AsRefStr)]
pub enum HookName {
    ChatInput,
    PreDrawInWorld,
    PostDrawInWorld,
    CatchFish,
}

/// A hook together with the signature revision a type implements.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct HookVersion {
    pub hook: HookName,
    pub version: u16,
}

impl HookVersion {
    pub const fn new(hook: HookName, version: u16) -> Self {
        Self { hook, version }
    }
}

/// A signature revision the loader refuses.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RetiredHook {
    pub owner: HookOwner,
    pub hook: HookName,
    pub version: u16,
}

pub const RETIRED_HOOKS: &[RetiredHook] = &[
    RetiredHook {
        owner: HookOwner::Mod,
        hook: HookName::ChatInput,
        version: 1,
    },
    RetiredHook {
        owner: HookOwner::ModItem,
        hook: HookName::PreDrawInWorld,
        version: 1,
    },
    RetiredHook {
        owner: HookOwner::ModItem,
        hook: HookName::PostDrawInWorld,
        version: 1,
    },
    RetiredHook {
        owner: HookOwner::GlobalItem,
        hook: HookName::PreDrawInWorld,
        version: 1,
    },
    RetiredHook {
        owner: HookOwner::GlobalItem,
        hook: HookName::PostDrawInWorld,
        version: 1,
    },
    RetiredHook {
        owner: HookOwner::ModPlayer,
        hook: HookName::CatchFish,
        version: 1,
    },
];

/// Rejects the first declared hook whose revision is retired for `owner`.
pub fn check_hooks(owner: HookOwner, declared: &[HookVersion]) -> Result<(), RegistryError> {
    let retired = declared.iter().find(|declared| {
        RETIRED_HOOKS.iter().any(|retired| {
            retired.owner == owner
                && retired.hook == declared.hook
                && retired.version == declared.version
        })
    });

    match retired {
        Some(hook) => Err(RegistryError::DeprecatedHook {
            hook: format!("{}.{}", owner, hook.hook),
        }),
        None => Ok(()),
    }
}
