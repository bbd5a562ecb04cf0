/// Generates the boilerplate for forwarding arithmetic operator traits onto a newtype that
/// exposes `value()` and `From<i64>`.
#[macro_export]
macro_rules! op {
    (binary $t:ty, $op:ident, $f:ident) => {
        impl $op for $t {
            type Output = Self;

            fn $f(self, rhs: Self) -> Self::Output {
                Self::from($op::$f(self.value(), rhs.value()))
            }
        }
    };
    (inplace $t:ty, $op:ident, $f:ident) => {
        impl $op for $t {
            fn $f(&mut self, rhs: Self) {
                let mut value = self.value();
                $op::$f(&mut value, rhs.value());
                *self = Self::from(value);
            }
        }
    };
    (unary $t:ty, $op:ident, $f:ident) => {
        impl $op for $t {
            type Output = Self;

            fn $f(self) -> Self::Output {
                Self::from($op::$f(self.value()))
            }
        }
    };
}
