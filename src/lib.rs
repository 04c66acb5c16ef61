pub mod cli;
pub mod dashboard;
pub mod dashboard_service;
pub mod database;
pub mod database_factory;
pub mod date_provider;
pub mod error;
pub mod group;
pub mod group_service;
pub mod pagination;
pub mod row_factories;
pub mod study;
pub mod study_activity_service;
pub mod word;
pub mod word_service;
