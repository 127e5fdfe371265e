mod smoke_tests;
mod store_mock;

// This file organizes the integration tests into a cohesive test suite.
// Each module tests a specific aspect of the application:
// - smoke_tests: Basic functionality tests to ensure nothing is broken
// - store_mock: Mocking the document store for testing without Redis
