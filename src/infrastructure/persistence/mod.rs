mod repositories;

pub use repositories::InMemorySessionRepository;
