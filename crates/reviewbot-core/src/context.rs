use reviewbot_config::Config;
use reviewbot_database_interface::DbService;
use reviewbot_lock_interface::LockService;

use crate::{CoreModule, ReviewerRng};

pub struct CoreContext<'a> {
    pub config: &'a Config,
    pub core_module: &'a CoreModule,
    pub db_service: &'a (dyn DbService + 'a),
    pub lock_service: &'a (dyn LockService + 'a),
    pub rng: &'a ReviewerRng,
}

#[cfg(any(test, feature = "testkit"))]
pub(crate) mod tests {
    use reviewbot_config::Config;
    use reviewbot_database_interface::DbService;
    use reviewbot_database_memory::MemoryDb;
    use reviewbot_lock_interface::MockLockService;
    use reviewbot_models::{Team, User};

    use crate::{CoreContext, CoreModule, ReviewerRng};

    #[allow(dead_code)]
    pub struct CoreContextTest {
        pub config: Config,
        pub core_module: CoreModule,
        pub db_service: MemoryDb,
        pub lock_service: MockLockService,
        pub rng: ReviewerRng,
    }

    impl CoreContextTest {
        #[allow(dead_code)]
        pub fn new() -> Self {
            let mut config = Config::from_env_no_version().unwrap();
            config.random_seed = 1;
            config.core.update_max_attempts = 5;

            Self {
                rng: ReviewerRng::from_seed(config.random_seed),
                config,
                core_module: CoreModule::builder().build(),
                db_service: MemoryDb::new(),
                lock_service: MockLockService::new(),
            }
        }

        #[allow(dead_code)]
        pub fn as_context(&self) -> CoreContext {
            CoreContext {
                config: &self.config,
                core_module: &self.core_module,
                db_service: &self.db_service,
                lock_service: &self.lock_service,
                rng: &self.rng,
            }
        }

        /// Create a team and one user per name, in order.
        #[allow(dead_code)]
        pub async fn seed_team(&self, team_name: &str, user_names: &[&str]) -> (Team, Vec<User>) {
            let team = self
                .db_service
                .teams_create(Team {
                    name: team_name.into(),
                    ..Default::default()
                })
                .await
                .unwrap();

            let mut users = vec![];
            for name in user_names {
                users.push(
                    self.db_service
                        .users_create(
                            User {
                                name: (*name).into(),
                                ..Default::default()
                            }
                            .with_team(&team),
                        )
                        .await
                        .unwrap(),
                );
            }

            (team, users)
        }
    }
}
