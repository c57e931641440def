pub(crate) mod create_team;
pub(crate) mod get_team;
pub(crate) mod mass_deactivate_team_users;

pub use create_team::CreateTeamInterface;
pub use get_team::{GetTeamInterface, TeamWithMembers};
pub use mass_deactivate_team_users::MassDeactivateTeamUsersInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_team::MockCreateTeamInterface, get_team::MockGetTeamInterface,
    mass_deactivate_team_users::MockMassDeactivateTeamUsersInterface,
};
