//! Test modules for the dial clock binary.
