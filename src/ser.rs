// Copyright 2019 Stichting Organism
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Serde Support
//!
//! Suite-generic key types serialize as their canonical byte encoding. Serde
//! carries no context, so the encoding is done with the suite's default value.

macro_rules! serde_boilerplate { ($t:ident) => {
    impl<S: crate::suite::Suite> ::serde::Serialize for $t<S> {
        fn serialize<Z>(&self, serializer: Z) -> Result<Z::Ok, Z::Error> where Z: ::serde::Serializer {
            serializer.serialize_bytes(&self.to_bytes(&S::default())[..])
        }
    }

    impl<'d, S: crate::suite::Suite> ::serde::Deserialize<'d> for $t<S> {
        fn deserialize<D>(deserializer: D) -> Result<Self, D::Error> where D: ::serde::Deserializer<'d> {
            struct MyVisitor<S>(::core::marker::PhantomData<S>);

            impl<'d, S: crate::suite::Suite> ::serde::de::Visitor<'d> for MyVisitor<S> {
                type Value = $t<S>;

                fn expecting(&self, formatter: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                    formatter.write_str(<$t<S>>::DESCRIPTION)
                }

                fn visit_bytes<E>(self, bytes: &[u8]) -> Result<$t<S>, E> where E: ::serde::de::Error {
                    <$t<S>>::from_bytes(&S::default(), bytes).map_err(crate::errors::serde_error_from_cosi_error)
                }
            }
            deserializer.deserialize_bytes(MyVisitor(::core::marker::PhantomData))
        }
    }
} } // macro_rules! serde_boilerplate
