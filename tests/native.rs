#[macro_use]
mod common;

#[cfg(test)]
mod native {
    tests! {
        string_fn in native is OK
        "123"
        "nil"
        "truefalse"
        "raw"
    }

    tests! {
        printmany in native is OK
        "1 2 3"
        "a"
        "mixed nil true 4.5"
        "x"
        "nil"
    }

    tests! {
        clock in native is OK
        "true"
        "true"
        "true"
    }

    tests! {
        arity in native is ERR(70)
        "[line 1] Error at ')': Expected 1 arguments but got 2"
    }
}
