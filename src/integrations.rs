// External integrations module
// This module contains integrations with external frameworks

pub mod generator;
