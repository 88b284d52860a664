#[macro_use]
mod common;

#[cfg(test)]
mod constructor {
    tests! {
        default in constructor is OK
        "init"
        "0"
    }

    tests! {
        with_arguments in constructor is OK
        "7"
    }

    tests! {
        bare_return in constructor is OK
        "false"
        "true"
    }

    tests! {
        calling_init_returns_instance in constructor is OK
        "<instance Point>"
    }

    tests! {
        return_value_in_init in constructor is ERR(65)
        "[line 3] Error at 'return': Cannot return a value from an initializer"
    }

    tests! {
        arity in constructor is ERR(70)
        "[line 5] Error at ')': Expected 2 arguments but got 1"
    }
}
