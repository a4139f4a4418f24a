//! Repository implementations

pub mod company_repo;

pub use company_repo::MemoryCompanyRepository;
