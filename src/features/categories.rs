//! Closed category types for the categorical request fields.
//!
//! Indices follow the label encoding the model was trained with
//! (alphabetical, except education which follows degree order).

/// A closed set of labels with a total integer encoding
pub trait Category: Copy + Sized + 'static {
    /// Every variant, ordered by index
    const ALL: &'static [Self];

    /// Variant used when a label is absent or unrecognised
    const FALLBACK: Self;

    /// Canonical label
    fn label(&self) -> &'static str;

    /// Encoded index
    fn index(&self) -> u8;

    /// Parse a label, ignoring surrounding whitespace and ASCII case
    fn from_label(label: &str) -> Option<Self> {
        let label = label.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|c| c.label().eq_ignore_ascii_case(label))
    }
}

macro_rules! category {
    (
        $(#[$meta:meta])*
        $name:ident, fallback = $fallback:ident,
        { $($variant:ident => ($label:expr, $index:expr)),+ $(,)? }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($variant),+
        }

        impl Category for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];
            const FALLBACK: Self = $name::$fallback;

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }

            fn index(&self) -> u8 {
                match self {
                    $($name::$variant => $index),+
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.label())
            }
        }
    };
}

category! {
    /// Highest completed education level
    Education, fallback = Bachelor, {
        HighSchool => ("High School", 0),
        Bachelor => ("Bachelor", 1),
        Master => ("Master", 2),
        PhD => ("PhD", 3),
    }
}

category! {
    /// Work location type
    Location, fallback = Suburban, {
        Rural => ("Rural", 0),
        Suburban => ("Suburban", 1),
        Urban => ("Urban", 2),
    }
}

category! {
    JobTitle, fallback = Manager, {
        Analyst => ("Analyst", 0),
        Consultant => ("Consultant", 1),
        Director => ("Director", 2),
        Engineer => ("Engineer", 3),
        Manager => ("Manager", 4),
        Specialist => ("Specialist", 5),
    }
}

category! {
    Gender, fallback = Male, {
        Female => ("Female", 0),
        Male => ("Male", 1),
    }
}
