/// Declares an enum whose variants map to a fixed ASCII mnemonic on the wire.
///
/// Generates `ALL`, `mnemonic()` and a case-insensitive `from_mnemonic()`.
macro_rules! wire_ids {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident = $wire:literal, )*
        }
    ) => {
        $(#[$meta])*
        pub enum $name {
            $( $(#[$vmeta])* $variant, )*
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$( $name::$variant, )*];

            #[inline]
            pub const fn mnemonic(self) -> &'static str {
                match self {
                    $( $name::$variant => $wire, )*
                }
            }

            pub fn from_mnemonic(s: &[u8]) -> Option<Self> {
                $(
                    if s.eq_ignore_ascii_case($wire.as_bytes()) {
                        return Some($name::$variant);
                    }
                )*
                None
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter) -> ::std::fmt::Result {
                f.write_str(self.mnemonic())
            }
        }
    };
}

/// Builds the static header lookup table out of `Talker Message` pairs.
macro_rules! sentence_table {
    ($( $talker:ident $message:ident; )*) => {
        pub(crate) static SENTENCE_TABLE: &[([u8; HEADER_LENGTH], SentenceKind)] = &[
            $(
                (
                    header_key(Talker::$talker, MessageId::$message),
                    SentenceKind {
                        talker: Talker::$talker,
                        message: MessageId::$message,
                    },
                ),
            )*
        ];
    };
}
