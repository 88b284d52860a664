#[macro_use]
mod common;

#[cfg(test)]
mod _return {
    tests! {
        value in return is OK
        "value"
    }

    tests! {
        nil_without_value in return is OK
        "nil"
    }

    tests! {
        from_loop in return is OK
        "3"
    }

    tests! {
        top_level in return is ERR(65)
        "[line 1] Error at 'return': Cannot return from top-level code"
    }
}
