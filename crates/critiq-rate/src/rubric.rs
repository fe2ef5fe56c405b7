//! Prompt-quality rubric — single source of truth for the review request.
//! The six criteria and the five-level scale are fixed; they do not vary by
//! use case.

pub const CRITERIA: &str = "\
**Specificity**: Clear, concrete requirements vs vague requests\n\
**Context**: Sufficient background information provided\n\
**Structure**: Organized, logical flow of instructions\n\
**Constraints**: Appropriate limits (length, format, style)\n\
**Examples**: Includes samples or clarifying details where helpful\n\
**Actionability**: AI can execute the request successfully";

pub const SCALE: &str = "\
★☆☆☆☆ (1/5) - Poor: Lacks 4+ criteria, likely to produce unusable output\n\
★★☆☆☆ (2/5) - Needs work: Missing 2-3 key criteria, inconsistent results expected\n\
★★★☆☆ (3/5) - Good: Meets basic requirements, has visible improvement opportunities\n\
★★★★☆ (4/5) - Very good: Strong prompt with minor optimizations possible (production-ready)\n\
★★★★★ (5/5) - Excellent: Exemplary prompt, minimal improvements possible";
