//! Per-chat conversation state
//!
//! Every variant is one point where the bot waits for the user's next input.
//! Wizards carry what they collected so far inside the variant.

use teloxide::dispatching::dialogue::{Dialogue, InMemStorage};

use crate::core::wizard::{CardDraft, Experience};

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum State {
    #[default]
    Idle,

    // Registration
    RegistrationWelcome,
    RegistrationExperience,
    RegistrationTimeCommitment {
        experience: Experience,
    },
    RegistrationSource {
        experience: Experience,
        time_commitment: String,
    },

    // Profile
    ProfileUniqueTag,

    // Profit submission
    ProfitAmount,
    ProfitPhoto {
        amount: i64,
    },

    // Admin panel
    AdminPassword,
    AdminMenu,
    AdminNewPassword,
    AdminPersonalLink,
    AdminChooseCard,
    AdminCard {
        draft: CardDraft,
    },
    AdminStopMenu,
    AdminStopAdd,
    AdminStopRemove,
    AdminCuratorMenu,
    AdminCuratorAdd,
    AdminCuratorRemove,
    AdminStaffMenu,
    AdminStaffAdd,
    AdminStaffRemove,
    AdminBanMenu,
    AdminBan,
    AdminUnban,
}

impl State {
    /// States reachable only after the admin password was accepted.
    pub fn is_admin_authenticated(&self) -> bool {
        matches!(
            self,
            Self::AdminMenu
                | Self::AdminNewPassword
                | Self::AdminPersonalLink
                | Self::AdminChooseCard
                | Self::AdminCard { .. }
                | Self::AdminStopMenu
                | Self::AdminStopAdd
                | Self::AdminStopRemove
                | Self::AdminCuratorMenu
                | Self::AdminCuratorAdd
                | Self::AdminCuratorRemove
                | Self::AdminStaffMenu
                | Self::AdminStaffAdd
                | Self::AdminStaffRemove
                | Self::AdminBanMenu
                | Self::AdminBan
                | Self::AdminUnban
        )
    }
}

pub type DialogueStorage = InMemStorage<State>;
pub type MyDialogue = Dialogue<State, DialogueStorage>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_state_is_idle() {
        assert_eq!(State::default(), State::Idle);
    }

    #[test]
    fn test_password_prompt_is_not_authenticated() {
        assert!(!State::AdminPassword.is_admin_authenticated());
        assert!(!State::Idle.is_admin_authenticated());
        assert!(State::AdminMenu.is_admin_authenticated());
        assert!(State::AdminCard {
            draft: CardDraft::new(1).unwrap()
        }
        .is_admin_authenticated());
    }
}
