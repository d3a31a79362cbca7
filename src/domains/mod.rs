// Domains module
// 도메인별 모듈 (models, services, handlers, routes)
pub mod auth;
pub mod payment;
