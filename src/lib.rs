// Payment API server library
// 결제 API 서버 라이브러리
//
// 도메인 모듈(domains)과 공유 인프라(shared)를 외부에 노출하여
// 통합 테스트에서 재사용할 수 있게 한다.
// Exposes the domain modules and shared infrastructure so integration
// tests can reuse them.

pub mod domains;
pub mod routes;
pub mod shared;
