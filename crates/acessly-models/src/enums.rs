use serde::{Deserialize, Serialize};
use sqlx::{
    Database, Decode, Encode, Postgres, Type,
    postgres::PgTypeInfo,
};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use utoipa::ToSchema;

/// A value outside an enum's closed set.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid {kind}: {value}")]
pub struct ParseEnumError {
    pub kind: &'static str,
    pub value: String,
}

/// Defines a closed enum stored as text, with serde, OpenAPI and sqlx support.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $name:ident ($kind:literal) {
            $( $(#[$vmeta:meta])* $variant:ident => $text:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
        pub enum $name {
            $(
                $(#[$vmeta])*
                #[serde(rename = $text)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub const fn as_str(self) -> &'static str {
                match self {
                    $($name::$variant => $text,)+
                }
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl FromStr for $name {
            type Err = ParseEnumError;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let s = s.trim();
                $name::ALL
                    .iter()
                    .copied()
                    .find(|v| v.as_str().eq_ignore_ascii_case(s))
                    .ok_or_else(|| ParseEnumError {
                        kind: $kind,
                        value: s.to_string(),
                    })
            }
        }

        impl Type<Postgres> for $name {
            fn type_info() -> PgTypeInfo {
                <String as Type<Postgres>>::type_info()
            }

            fn compatible(ty: &PgTypeInfo) -> bool {
                <String as Type<Postgres>>::compatible(ty)
            }
        }

        impl<'q> Encode<'q, Postgres> for $name {
            fn encode_by_ref(
                &self,
                buf: &mut <Postgres as Database>::ArgumentBuffer<'q>,
            ) -> Result<sqlx::encode::IsNull, sqlx::error::BoxDynError> {
                <&str as Encode<'q, Postgres>>::encode_by_ref(&self.as_str(), buf)
            }
        }

        impl<'r> Decode<'r, Postgres> for $name {
            fn decode(
                value: <Postgres as Database>::ValueRef<'r>,
            ) -> Result<Self, sqlx::error::BoxDynError> {
                let s = <&str as Decode<'r, Postgres>>::decode(value)?;
                Ok(s.parse::<$name>()?)
            }
        }
    };
}

closed_enum! {
    /// Account kind; decides which write capabilities a token carries.
    UserRole("role") {
        Candidate => "CANDIDATE",
        Company => "COMPANY",
    }
}

closed_enum! {
    /// How far a company has adapted its workplace.
    AccessibilityType("accessibilityType") {
        Low => "LOW",
        Medium => "MEDIUM",
        High => "HIGH",
    }
}

closed_enum! {
    DisabilityType("disabilityType") {
        Physical => "PHYSICAL",
        Visual => "VISUAL",
        Auditory => "AUDITORY",
        Cognitive => "COGNITIVE",
    }
}

closed_enum! {
    VacancyType("vacancyType") {
        Remote => "REMOTE",
        Hybrid => "HYBRID",
        /// On-site work.
        Presential => "PRESENTIAL",
    }
}

closed_enum! {
    /// Review state of a candidacy. New candidacies start under analysis.
    CandidacyStatus("status") {
        UnderAnalysis => "UNDER_ANALYSIS",
        Approved => "APPROVED",
        Rejected => "REJECTED",
    }
}

impl Default for CandidacyStatus {
    fn default() -> Self {
        Self::UnderAnalysis
    }
}
