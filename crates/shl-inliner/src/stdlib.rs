//! Standard library headers
//!
//! Headers in this set are never resolved or inlined. Their include lines
//! are re-emitted verbatim, once per run.

use once_cell::sync::Lazy;
use std::collections::HashSet;

/// C and C++ standard library headers, plus compiler intrinsics
pub const STANDARD_HEADERS: &[&str] = &[
    "algorithm",
    "any",
    "array",
    "assert.h",
    "atomic",
    "bit",
    "bitset",
    "cassert",
    "ccomplex",
    "cctype",
    "cerrno",
    "cfenv",
    "cfloat",
    "charconv",
    "chrono",
    "cinttypes",
    "ciso646",
    "climits",
    "clocale",
    "cmath",
    "codecvt",
    "compare",
    "complex",
    "complex.h",
    "concepts",
    "condition_variable",
    "contract",
    "csetjmp",
    "csignal",
    "cstdalign",
    "cstdarg",
    "cstdbool",
    "cstddef",
    "cstdint",
    "cstdio",
    "cstdlib",
    "cstring",
    "ctgmath",
    "ctime",
    "ctype.h",
    "cuchar",
    "cwchar",
    "cwctype",
    "deque",
    "errno.h",
    "exception",
    "execution",
    "experimental/algorithm",
    "experimental/any",
    "experimental/array",
    "experimental/atomic",
    "experimental/barrier",
    "experimental/chrono",
    "experimental/deque",
    "experimental/exception_list",
    "experimental/execution_policy",
    "experimental/filesystem",
    "experimental/forward_list",
    "experimental/functional",
    "experimental/future",
    "experimental/iterator",
    "experimental/latch",
    "experimental/list",
    "experimental/map",
    "experimental/memory",
    "experimental/memory_resource",
    "experimental/numeric",
    "experimental/optional",
    "experimental/propagate_const",
    "experimental/random",
    "experimental/ranges/algorithm",
    "experimental/ranges/concepts",
    "experimental/ranges/functional",
    "experimental/ranges/iterator",
    "experimental/ranges/random",
    "experimental/ranges/range",
    "experimental/ranges/tuple",
    "experimental/ranges/type_traits",
    "experimental/ranges/utility",
    "experimental/ratio",
    "experimental/regex",
    "experimental/set",
    "experimental/source_location",
    "experimental/string",
    "experimental/string_view",
    "experimental/system_error",
    "experimental/tuple",
    "experimental/type_traits",
    "experimental/unordered_map",
    "experimental/unordered_set",
    "experimental/utility",
    "experimental/vector",
    "fenv.h",
    "filesystem",
    "float.h",
    "forward_list",
    "fstream",
    "functional",
    "future",
    "initializer_list",
    "inttypes.h",
    "iomanip",
    "ios",
    "iosfwd",
    "iostream",
    "iso646.h",
    "istream",
    "iterator",
    "limits",
    "limits.h",
    "list",
    "locale",
    "locale.h",
    "map",
    "math.h",
    "memory",
    "memory_resource",
    "mutex",
    "new",
    "numeric",
    "optional",
    "ostream",
    "queue",
    "random",
    "ratio",
    "regex",
    "scoped_allocator",
    "set",
    "setjmp.h",
    "shared_mutex",
    "signal.h",
    "span",
    "sstream",
    "stack",
    "stdalign.h",
    "stdarg.h",
    "stdatomic.h",
    "stdbool.h",
    "stddef.h",
    "stdexcept",
    "stdint.h",
    "stdio.h",
    "stdlib.h",
    "stdnoreturn.h",
    "streambuf",
    "string",
    "string.h",
    "string_view",
    "strstream",
    "syncstream",
    "system_error",
    "tgmath.h",
    "thread",
    "threads.h",
    "time.h",
    "tuple",
    "type_traits",
    "typeindex",
    "typeinfo",
    "uchar.h",
    "unordered_map",
    "unordered_set",
    "utility",
    "valarray",
    "variant",
    "vector",
    "version",
    "wchar.h",
    "wctype.h",
    "barrier",
    "exception_list",
    "execution_policy",
    "latch",
    "propagate_const",
    "ranges/algorithm",
    "ranges/concepts",
    "ranges/functional",
    "ranges/iterator",
    "ranges/random",
    "ranges/range",
    "ranges/tuple",
    "ranges/type_traits",
    "ranges/utility",
    "source_location",
    "immintrin.h",
    "intrin.h",
];

static STANDARD_SET: Lazy<HashSet<&'static str>> =
    Lazy::new(|| STANDARD_HEADERS.iter().copied().collect());

/// Whether `target` names a standard header, compared literally
pub fn is_standard_header(target: &str) -> bool {
    STANDARD_SET.contains(target)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_headers() {
        assert!(is_standard_header("vector"));
        assert!(is_standard_header("cstdint"));
        assert!(is_standard_header("stdio.h"));
        assert!(is_standard_header("experimental/filesystem"));
        assert!(is_standard_header("ranges/algorithm"));
        assert!(is_standard_header("immintrin.h"));
    }

    #[test]
    fn test_literal_match_only() {
        assert!(!is_standard_header("Vector"));
        assert!(!is_standard_header(" vector"));
        assert!(!is_standard_header("std/vector"));
        assert!(!is_standard_header("sys/types.h"));
        assert!(!is_standard_header("chess.hpp"));
    }

    #[test]
    fn test_no_duplicate_entries() {
        assert_eq!(STANDARD_SET.len(), STANDARD_HEADERS.len());
    }
}
