//! Scene layer integration tests
