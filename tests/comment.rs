#[macro_use]
mod common;

#[cfg(test)]
mod comment {
    tests! {
        line in comment is OK
        "one"
        "two"
    }

    tests! {
        block in comment is OK
        "after"
        "inline"
    }

    tests! {
        unterminated_block in comment is ERR(65)
        "[line 2] Error: Unterminated block comment"
    }
}
