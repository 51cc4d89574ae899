// Skill canonicalization and fit scoring.
// Implements: alias table, noise exclusion, rule matcher, NER candidate path, set-overlap scoring.
// Pure and synchronous; the only I/O is loading optional artifacts at startup.

pub mod aliases;
pub mod entities;
pub mod exclusion;
pub mod extractor;
pub mod fit_scoring;
pub mod gazetteer;
pub mod handlers;
pub mod jd_details;
pub mod matcher;
pub mod policy;
