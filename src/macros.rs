/// Assert that two floats are equal within the given epsilon.
#[cfg(test)]
macro_rules! assert_f32_eq {
    ($a:expr, $b:expr, $eps:expr) => {{
        // Make variables to avoid evaluating expressions multiple times.
        let a: f32 = $a;
        let b: f32 = $b;
        let eps: f32 = $eps;
        let error = (a - b).abs();
        assert!(
            error <= eps,
            "Assertion failed: |({}) - ({})| = {:e} <= {:e}",
            a,
            b,
            error,
            eps
        );
    }};
    ($a:expr, $b:expr) => {
        $crate::macros::assert_f32_eq!($a, $b, f32::EPSILON)
    };
}

#[cfg(test)]
pub(crate) use assert_f32_eq;
