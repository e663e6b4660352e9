//! Degreeplan Core Types
//!
//! This crate provides the data model shared by the degree-plan loader and
//! engine:
//!
//! - **Identifiers**: String-interned course ids ([`identifier::Id`])
//! - **Catalog**: Courses and their prerequisite trees ([`catalog`], [`prerequisite`])
//! - **Plan**: Ordered semesters of course ids ([`plan`])
//! - **Session**: Grades, pass flags and classification checkboxes ([`session`])
//! - **Rules**: Degree rules, course lists and templates ([`rule`], [`course_list`], [`template`])

pub mod catalog;
pub mod course_list;
pub mod identifier;
pub mod plan;
pub mod prerequisite;
pub mod rule;
pub mod session;
pub mod template;
