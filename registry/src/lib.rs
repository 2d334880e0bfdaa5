use std::sync::Arc;

use adapter::database::ConnectionPool;
use adapter::repository::health::HealthCheckRepositoryImpl;
use adapter::repository::meeting::MeetingRepositoryImpl;
use adapter::repository::person::PersonRepositoryImpl;
use adapter::repository::schedule::ScheduleRepositoryImpl;
use kernel::repository::health::HealthCheckRepository;
use kernel::repository::meeting::MeetingRepository;
use kernel::repository::person::PersonRepository;
use kernel::repository::schedule::ScheduleRepository;

#[derive(Clone)]
pub struct AppRegistry {
    health_check_repository: Arc<dyn HealthCheckRepository>,
    person_repository: Arc<dyn PersonRepository>,
    schedule_repository: Arc<dyn ScheduleRepository>,
    meeting_repository: Arc<dyn MeetingRepository>,
}

impl AppRegistry {
    pub fn new(pool: ConnectionPool) -> Self {
        let health_check_repository = Arc::new(HealthCheckRepositoryImpl::new(pool.clone()));
        let person_repository = Arc::new(PersonRepositoryImpl::new(pool.clone()));
        let schedule_repository = Arc::new(ScheduleRepositoryImpl::new(pool.clone()));
        let meeting_repository = Arc::new(MeetingRepositoryImpl::new(pool.clone()));
        Self {
            health_check_repository,
            person_repository,
            schedule_repository,
            meeting_repository,
        }
    }

    pub fn health_check_repository(&self) -> Arc<dyn HealthCheckRepository> {
        self.health_check_repository.clone()
    }

    pub fn person_repository(&self) -> Arc<dyn PersonRepository> {
        self.person_repository.clone()
    }

    pub fn schedule_repository(&self) -> Arc<dyn ScheduleRepository> {
        self.schedule_repository.clone()
    }

    pub fn meeting_repository(&self) -> Arc<dyn MeetingRepository> {
        self.meeting_repository.clone()
    }
}
