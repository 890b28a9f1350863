//! Route handlers.
//!
//! A handler is any `Fn` taking up to six positional arguments, each
//! converted from one path parameter through [`FromParam`]. The number of
//! arguments is known statically, so the router can reject a handler whose
//! arity differs from its pattern's parameter count when it is built.
//! Raw handlers built with [`BoxedHandler::any_arity`] accept whatever their
//! pattern declares.

use std::marker::PhantomData;

use crate::routing::error::ResolveError;
use crate::routing::params::{Param, ParamValue, Params};

/// Conversion from an extracted parameter into a handler argument.
pub trait FromParam: Sized {
    fn from_param(value: &ParamValue) -> Option<Self>;
}

impl FromParam for ParamValue {
    fn from_param(value: &ParamValue) -> Option<Self> {
        Some(value.clone())
    }
}

impl FromParam for String {
    fn from_param(value: &ParamValue) -> Option<Self> {
        Some(value.to_string())
    }
}

macro_rules! impl_from_param_int {
    ($($ty:ty),*) => { $(
        impl FromParam for $ty {
            fn from_param(value: &ParamValue) -> Option<Self> {
                match value {
                    ParamValue::Integer(n) => <$ty>::try_from(*n).ok(),
                    ParamValue::Text(text) => text.parse().ok(),
                }
            }
        }
    )* };
}

impl_from_param_int!(i32, i64, u32, u64, usize);

fn extract<T: FromParam>(param: Option<&Param>) -> Result<T, ResolveError> {
    let param = param.ok_or(ResolveError::ArityMismatch {
        expected: 1,
        actual: 0,
    })?;

    T::from_param(&param.value).ok_or_else(|| ResolveError::ParamConversion {
        name: param.name.clone(),
        value: param.value.to_string(),
        expected: std::any::type_name::<T>().to_owned(),
    })
}

/// A callable that can be bound to a route.
///
/// `Args` is the tuple of argument types; it only serves to keep the
/// implementations for different arities apart.
pub trait Handler<Args, R>: 'static {
    /// Number of positional arguments.
    const ARITY: usize;

    fn call(&self, params: &Params) -> Result<R, ResolveError>;
}

macro_rules! impl_handler {
    ($arity:expr; $($ty:ident),*) => {
        impl<F, R, $($ty,)*> Handler<($($ty,)*), R> for F
        where
            F: Fn($($ty),*) -> R + 'static,
            $($ty: FromParam,)*
        {
            const ARITY: usize = $arity;

            #[allow(non_snake_case, unused_mut, unused_variables)]
            fn call(&self, params: &Params) -> Result<R, ResolveError> {
                if params.len() != $arity {
                    return Err(ResolveError::ArityMismatch {
                        expected: $arity,
                        actual: params.len(),
                    });
                }

                let mut values = params.iter();
                $(let $ty = extract::<$ty>(values.next())?;)*
                Ok((self)($($ty),*))
            }
        }
    };
}

impl_handler!(0;);
impl_handler!(1; T1);
impl_handler!(2; T1, T2);
impl_handler!(3; T1, T2, T3);
impl_handler!(4; T1, T2, T3, T4);
impl_handler!(5; T1, T2, T3, T4, T5);
impl_handler!(6; T1, T2, T3, T4, T5, T6);

trait ErasedHandler<R> {
    fn arity(&self) -> Option<usize>;
    fn call(&self, params: &Params) -> Result<R, ResolveError>;
}

struct TypedHandler<F, Args> {
    handler: F,
    _args: PhantomData<fn(Args)>,
}

impl<F, Args, R> ErasedHandler<R> for TypedHandler<F, Args>
where
    F: Handler<Args, R>,
{
    fn arity(&self) -> Option<usize> {
        Some(<F as Handler<Args, R>>::ARITY)
    }

    fn call(&self, params: &Params) -> Result<R, ResolveError> {
        self.handler.call(params)
    }
}

struct RawHandler<F> {
    arity: Option<usize>,
    handler: F,
}

impl<F, R> ErasedHandler<R> for RawHandler<F>
where
    F: Fn(&Params) -> R,
{
    fn arity(&self) -> Option<usize> {
        self.arity
    }

    fn call(&self, params: &Params) -> Result<R, ResolveError> {
        if let Some(expected) = self.arity.filter(|&n| n != params.len()) {
            return Err(ResolveError::ArityMismatch {
                expected,
                actual: params.len(),
            });
        }
        Ok((self.handler)(params))
    }
}

/// A type-erased handler returning `R`.
pub struct BoxedHandler<R> {
    inner: Box<dyn ErasedHandler<R>>,
}

impl<R: 'static> BoxedHandler<R> {
    /// Wrap a positional handler.
    pub fn new<F, Args>(handler: F) -> Self
    where
        F: Handler<Args, R>,
        Args: 'static,
    {
        Self {
            inner: Box::new(TypedHandler {
                handler,
                _args: PhantomData,
            }),
        }
    }

    /// Wrap a handler that takes all parameters at once.
    ///
    /// `arity` is the number of parameters it expects to receive.
    pub fn raw<F>(arity: usize, handler: F) -> Self
    where
        F: Fn(&Params) -> R + 'static,
    {
        Self {
            inner: Box::new(RawHandler {
                arity: Some(arity),
                handler,
            }),
        }
    }

    /// Wrap a handler that takes all parameters at once, however many its
    /// pattern declares.
    pub fn any_arity<F>(handler: F) -> Self
    where
        F: Fn(&Params) -> R + 'static,
    {
        Self {
            inner: Box::new(RawHandler {
                arity: None,
                handler,
            }),
        }
    }
}

impl<R> BoxedHandler<R> {
    /// Number of parameters the handler expects, or `None` if it accepts
    /// any count.
    pub fn arity(&self) -> Option<usize> {
        self.inner.arity()
    }

    pub fn call(&self, params: &Params) -> Result<R, ResolveError> {
        self.inner.call(params)
    }
}

impl<R> std::fmt::Debug for BoxedHandler<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BoxedHandler")
            .field("arity", &self.arity())
            .finish()
    }
}
