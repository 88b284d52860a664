#[macro_use]
mod common;

#[cfg(test)]
mod variable {
    tests! {
        uninitialized in variable is OK
        "nil"
    }

    tests! {
        shadowing in variable is OK
        "local"
        "global"
    }

    tests! {
        early_bound in variable is OK
        "outer"
        "outer"
    }

    tests! {
        redefine_global in variable is OK
        "2"
    }

    tests! {
        use_in_own_initializer in variable is ERR(65)
        "[line 3] Error at 'a': Cannot read local variable in its own initializer"
    }

    tests! {
        redeclare_local in variable is ERR(65)
        "[line 3] Error at 'a': A variable is already defined with name 'a' in this scope"
    }

    tests! {
        undefined_global in variable is ERR(70)
        "[line 1] Error at 'missing': Undefined variable 'missing'"
    }

    tests! {
        undefined_assign in variable is ERR(70)
        "[line 1] Error at 'missing': Undefined variable 'missing'"
    }
}
