#[macro_use]
mod common;

#[cfg(test)]
mod function {
    tests! {
        recursion in function is OK
        "55"
    }

    tests! {
        return_nil in function is OK
        "nil"
    }

    tests! {
        print_function in function is OK
        "<fn add>"
        "<native fn clock>"
    }

    tests! {
        arity in function is ERR(70)
        "[line 5] Error at ')': Expected 2 arguments but got 1"
    }

    tests! {
        call_non_callable in function is ERR(70)
        "[line 2] Error at ')': Can only call functions and classes, got string type"
    }
}
