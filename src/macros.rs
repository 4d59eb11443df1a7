// Copyright © 2016–2018 University of Malta

// This program is free software: you can redistribute it and/or
// modify it under the terms of the GNU Lesser General Public License
// as published by the Free Software Foundation, either version 3 of
// the License, or (at your option) any later version.
//
// This program is distributed in the hope that it will be useful, but
// WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the GNU
// General Public License for more details.
//
// You should have received a copy of the GNU Lesser General Public
// License and a copy of the GNU General Public License along with
// this program. If not, see <http://www.gnu.org/licenses/>.

// big op big -> Big
// big op &big -> Big
// &big op big -> Big
// &big op &big -> Big
// big op= big
// big op= &big
macro_rules! arith_binary {
    {
        $Big:ty;
        $func:path;
        $Imp:ident $method:ident;
        $ImpAssign:ident $method_assign:ident
    } => {
        impl $Imp<$Big> for $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: $Big) -> $Big {
                $func(&self, &rhs)
            }
        }

        impl<'a> $Imp<&'a $Big> for $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: &'a $Big) -> $Big {
                $func(&self, rhs)
            }
        }

        impl<'a> $Imp<$Big> for &'a $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: $Big) -> $Big {
                $func(self, &rhs)
            }
        }

        impl<'a, 'b> $Imp<&'a $Big> for &'b $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: &'a $Big) -> $Big {
                $func(self, rhs)
            }
        }

        impl $ImpAssign<$Big> for $Big {
            #[inline]
            fn $method_assign(&mut self, rhs: $Big) {
                *self = $func(self, &rhs);
            }
        }

        impl<'a> $ImpAssign<&'a $Big> for $Big {
            #[inline]
            fn $method_assign(&mut self, rhs: &'a $Big) {
                *self = $func(self, rhs);
            }
        }
    };
}

// big op prim -> Big
// &big op prim -> Big
// prim op big -> Big
// prim op &big -> Big
// big op= prim
macro_rules! arith_prim {
    {
        $Big:ty;
        $func:path;
        $Imp:ident $method:ident;
        $ImpAssign:ident $method_assign:ident;
        $($T:ty)*
    } => { $(
        impl $Imp<$T> for $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: $T) -> $Big {
                $func(&self, &<$Big>::from(rhs))
            }
        }

        impl<'a> $Imp<$T> for &'a $Big {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: $T) -> $Big {
                $func(self, &<$Big>::from(rhs))
            }
        }

        impl $Imp<$Big> for $T {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: $Big) -> $Big {
                $func(&<$Big>::from(self), &rhs)
            }
        }

        impl<'a> $Imp<&'a $Big> for $T {
            type Output = $Big;
            #[inline]
            fn $method(self, rhs: &'a $Big) -> $Big {
                $func(&<$Big>::from(self), rhs)
            }
        }

        impl $ImpAssign<$T> for $Big {
            #[inline]
            fn $method_assign(&mut self, rhs: $T) {
                *self = $func(self, &<$Big>::from(rhs));
            }
        }
    )* };
}

macro_rules! arith_unary {
    { $Big:ty; $func:path; $Imp:ident $method:ident } => {
        impl $Imp for $Big {
            type Output = $Big;
            #[inline]
            fn $method(self) -> $Big {
                $func(&self)
            }
        }

        impl<'a> $Imp for &'a $Big {
            type Output = $Big;
            #[inline]
            fn $method(self) -> $Big {
                $func(self)
            }
        }
    };
}

// big == prim, prim == big, big <=> prim, prim <=> big
macro_rules! cmp_prim {
    { $Big:ty; $cmp:path; $($T:ty)* } => { $(
        impl PartialEq<$T> for $Big {
            #[inline]
            fn eq(&self, other: &$T) -> bool {
                $cmp(self, &<$Big>::from(*other)) == Some(::std::cmp::Ordering::Equal)
            }
        }

        impl PartialEq<$Big> for $T {
            #[inline]
            fn eq(&self, other: &$Big) -> bool {
                $cmp(other, &<$Big>::from(*self)) == Some(::std::cmp::Ordering::Equal)
            }
        }

        impl PartialOrd<$T> for $Big {
            #[inline]
            fn partial_cmp(&self, other: &$T) -> Option<::std::cmp::Ordering> {
                $cmp(self, &<$Big>::from(*other))
            }
        }

        impl PartialOrd<$Big> for $T {
            #[inline]
            fn partial_cmp(&self, other: &$Big) -> Option<::std::cmp::Ordering> {
                $cmp(other, &<$Big>::from(*self)).map(::std::cmp::Ordering::reverse)
            }
        }
    )* };
}
