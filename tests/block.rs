#[macro_use]
mod common;

#[cfg(test)]
mod block {
    tests! {
        scope_chain in block is OK
        "abc"
        "ab"
        "a"
    }

    tests! {
        environment_restored in block is OK
        "outer"
    }
}
