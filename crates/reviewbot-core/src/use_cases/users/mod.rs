pub(crate) mod create_user;
pub(crate) mod deactivate_user;

pub use create_user::CreateUserInterface;
pub use deactivate_user::DeactivateUserInterface;

#[cfg(any(test, feature = "testkit"))]
pub use self::{
    create_user::MockCreateUserInterface, deactivate_user::MockDeactivateUserInterface,
};
