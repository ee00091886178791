pub mod chain_tests;
