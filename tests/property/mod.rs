// Copyright (c) 2025 - Cowboy AI, Inc.
//! Property-Based Tests Module

mod identifier_setters;
mod quantity_setters;
