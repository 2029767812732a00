//! Team aggregate root and the per-user membership state machine.

use super::{TeamDescription, TeamDomainError, TeamId, TeamName};
use crate::identity::domain::UserId;
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Relationship between one user and one team.
///
/// `Unrelated -> Invited` on invite, `Invited -> Member` on accept,
/// `Invited -> Unrelated` on reject, and `Member -> Unrelated` on leave or
/// removal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MembershipState {
    /// Neither invited nor a member.
    Unrelated,
    /// Holds a pending invite.
    Invited,
    /// Belongs to the team.
    Member,
}

/// Result of inviting a user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum InviteOutcome {
    /// A new pending invite was recorded.
    Invited,
    /// The user already held a pending invite; nothing changed.
    AlreadyInvited,
    /// The user is already a member; nothing changed.
    AlreadyMember,
}

/// Result of a member leaving a team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeaveOutcome {
    /// A regular member left.
    Left,
    /// The admin left after handing the role to another member.
    AdminHandedOver {
        /// Member who now administers the team.
        new_admin: UserId,
    },
    /// The sole member left, so the team must be deleted.
    Disbanded,
}

/// Team aggregate root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    id: TeamId,
    name: TeamName,
    description: TeamDescription,
    admin: UserId,
    members: BTreeSet<UserId>,
    invitees: BTreeSet<UserId>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a persisted team.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedTeamData {
    /// Persisted team identifier.
    pub id: TeamId,
    /// Persisted unique name.
    pub name: TeamName,
    /// Persisted description.
    pub description: TeamDescription,
    /// Persisted admin.
    pub admin: UserId,
    /// Persisted member set.
    pub members: BTreeSet<UserId>,
    /// Persisted pending invites.
    pub invitees: BTreeSet<UserId>,
    /// Persisted creation timestamp.
    pub created_at: DateTime<Utc>,
    /// Persisted latest update timestamp.
    pub updated_at: DateTime<Utc>,
}

impl Team {
    /// Creates a team whose admin is also its sole member.
    #[must_use]
    pub fn new(
        name: TeamName,
        description: TeamDescription,
        admin: UserId,
        clock: &impl Clock,
    ) -> Self {
        let timestamp = clock.utc();
        Self {
            id: TeamId::new(),
            name,
            description,
            admin,
            members: BTreeSet::from([admin]),
            invitees: BTreeSet::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Reconstructs a team from persisted storage.
    #[must_use]
    pub fn from_persisted(data: PersistedTeamData) -> Self {
        Self {
            id: data.id,
            name: data.name,
            description: data.description,
            admin: data.admin,
            members: data.members,
            invitees: data.invitees,
            created_at: data.created_at,
            updated_at: data.updated_at,
        }
    }

    /// Returns the team identifier.
    #[must_use]
    pub const fn id(&self) -> TeamId {
        self.id
    }

    /// Returns the team name.
    #[must_use]
    pub const fn name(&self) -> &TeamName {
        &self.name
    }

    /// Returns the team description.
    #[must_use]
    pub const fn description(&self) -> &TeamDescription {
        &self.description
    }

    /// Returns the current admin.
    #[must_use]
    pub const fn admin(&self) -> UserId {
        self.admin
    }

    /// Returns the member set.
    #[must_use]
    pub const fn members(&self) -> &BTreeSet<UserId> {
        &self.members
    }

    /// Returns the users holding a pending invite.
    #[must_use]
    pub const fn invitees(&self) -> &BTreeSet<UserId> {
        &self.invitees
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns whether the user administers this team.
    #[must_use]
    pub fn is_admin(&self, user: UserId) -> bool {
        self.admin == user
    }

    /// Returns whether the user belongs to this team.
    #[must_use]
    pub fn is_member(&self, user: UserId) -> bool {
        self.members.contains(&user)
    }

    /// Returns where the user stands with this team.
    #[must_use]
    pub fn membership_state(&self, user: UserId) -> MembershipState {
        if self.members.contains(&user) {
            MembershipState::Member
        } else if self.invitees.contains(&user) {
            MembershipState::Invited
        } else {
            MembershipState::Unrelated
        }
    }

    /// Members other than the given user, in identifier order.
    #[must_use]
    pub fn members_except(&self, user: UserId) -> Vec<UserId> {
        self.members
            .iter()
            .copied()
            .filter(|member| *member != user)
            .collect()
    }

    /// Fails unless the user administers this team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAdmin`] for anyone but the admin.
    pub fn ensure_admin(&self, user: UserId) -> Result<(), TeamDomainError> {
        if self.is_admin(user) {
            Ok(())
        } else {
            Err(TeamDomainError::NotAdmin {
                team_id: self.id,
                user_id: user,
            })
        }
    }

    /// Fails unless the user belongs to this team.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAMember`] for non-members.
    pub fn ensure_member(&self, user: UserId) -> Result<(), TeamDomainError> {
        if self.is_member(user) {
            Ok(())
        } else {
            Err(TeamDomainError::NotAMember {
                team_id: self.id,
                user_id: user,
            })
        }
    }

    /// Records a pending invite unless the user is already invited or a
    /// member. Repeating the call never creates a second invite.
    pub fn invite(&mut self, user: UserId, clock: &impl Clock) -> InviteOutcome {
        match self.membership_state(user) {
            MembershipState::Member => InviteOutcome::AlreadyMember,
            MembershipState::Invited => InviteOutcome::AlreadyInvited,
            MembershipState::Unrelated => {
                self.invitees.insert(user);
                self.touch(clock);
                InviteOutcome::Invited
            }
        }
    }

    /// Invites each candidate on behalf of the admin.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAdmin`] when the requester is not the
    /// admin; nobody is invited in that case.
    pub fn add_members(
        &mut self,
        requester: UserId,
        candidates: &[UserId],
        clock: &impl Clock,
    ) -> Result<Vec<(UserId, InviteOutcome)>, TeamDomainError> {
        self.ensure_admin(requester)?;
        Ok(candidates
            .iter()
            .map(|candidate| (*candidate, self.invite(*candidate, clock)))
            .collect())
    }

    /// Turns a pending invite into membership.
    ///
    /// Returns `false` without changes when the user holds no invite.
    pub fn accept_invite(&mut self, user: UserId, clock: &impl Clock) -> bool {
        if !self.invitees.remove(&user) {
            return false;
        }
        self.members.insert(user);
        self.touch(clock);
        true
    }

    /// Discards a pending invite; membership is untouched.
    ///
    /// Returns `false` without changes when the user holds no invite.
    pub fn reject_invite(&mut self, user: UserId, clock: &impl Clock) -> bool {
        if !self.invitees.remove(&user) {
            return false;
        }
        self.touch(clock);
        true
    }

    /// Hands the admin role to another member.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAdmin`] unless the requester is the
    /// admin, or [`TeamDomainError::NotAMember`] when the new admin does not
    /// belong to the team.
    pub fn transfer_admin(
        &mut self,
        requester: UserId,
        new_admin: UserId,
        clock: &impl Clock,
    ) -> Result<(), TeamDomainError> {
        self.ensure_admin(requester)?;
        self.ensure_member(new_admin)?;
        if new_admin != self.admin {
            self.admin = new_admin;
            self.touch(clock);
        }
        Ok(())
    }

    /// Removes the listed members on behalf of the admin.
    ///
    /// Listed users who are not members are ignored. Returns the users that
    /// were actually removed.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAdmin`] unless the requester is the
    /// admin, or [`TeamDomainError::CannotRemoveAdmin`] when the admin is
    /// listed. Nobody is removed on error.
    pub fn remove_members(
        &mut self,
        requester: UserId,
        members: &[UserId],
        clock: &impl Clock,
    ) -> Result<Vec<UserId>, TeamDomainError> {
        self.ensure_admin(requester)?;
        if members.contains(&self.admin) {
            return Err(TeamDomainError::CannotRemoveAdmin {
                team_id: self.id,
                user_id: self.admin,
            });
        }

        let removed: Vec<UserId> = members
            .iter()
            .copied()
            .filter(|member| self.members.remove(member))
            .collect();
        if !removed.is_empty() {
            self.touch(clock);
        }
        Ok(removed)
    }

    /// Removes the user from the team.
    ///
    /// A leaving admin hands the role to `successor` first. The sole member
    /// leaving yields [`LeaveOutcome::Disbanded`] without mutating the team;
    /// the caller deletes it.
    ///
    /// # Errors
    ///
    /// Returns [`TeamDomainError::NotAMember`] when the user or the named
    /// successor does not belong to the team,
    /// [`TeamDomainError::SuccessorRequired`] when an admin with remaining
    /// members names nobody, or [`TeamDomainError::SelfSuccession`] when the
    /// admin names themselves.
    pub fn leave(
        &mut self,
        user: UserId,
        successor: Option<UserId>,
        clock: &impl Clock,
    ) -> Result<LeaveOutcome, TeamDomainError> {
        self.ensure_member(user)?;

        if !self.is_admin(user) {
            self.members.remove(&user);
            self.touch(clock);
            return Ok(LeaveOutcome::Left);
        }

        if self.members.len() == 1 {
            return Ok(LeaveOutcome::Disbanded);
        }

        let new_admin = successor.ok_or(TeamDomainError::SuccessorRequired(self.id))?;
        if new_admin == user {
            return Err(TeamDomainError::SelfSuccession {
                team_id: self.id,
                user_id: user,
            });
        }
        self.ensure_member(new_admin)?;

        self.admin = new_admin;
        self.members.remove(&user);
        self.touch(clock);
        Ok(LeaveOutcome::AdminHandedOver { new_admin })
    }

    fn touch(&mut self, clock: &impl Clock) {
        self.updated_at = clock.utc();
    }
}
