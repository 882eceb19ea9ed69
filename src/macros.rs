// src/macros.rs
#[macro_export]
macro_rules! s {
    // String shorthand!

    // Zero-arg → String::new()
    () => {
        ::std::string::String::new()
    };
    // Any single expression: literals, consts, vars
    ($expr:expr) => {
        ::std::string::String::from($expr)
    };
}

#[macro_export]
macro_rules! tagged {
    // Flat-row key: "<TAG>:<field>"
    ($tag:expr, $field:expr) => {{
        let tag: &str = $tag;
        let field: &str = $field;
        let mut s = ::std::string::String::with_capacity(tag.len() + 1 + field.len());
        s.push_str(tag);
        s.push(':');
        s.push_str(field);
        s
    }};
}
