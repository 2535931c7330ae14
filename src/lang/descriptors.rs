use super::{BlockStyle, DocPlacement, Language, LanguageDescriptor};

const JSDOC_FORMAT: &str = "/**\n * \n */";

pub static PYTHON: LanguageDescriptor = LanguageDescriptor {
    language: Language::Python,
    name: "python",
    extensions: &["py", "pyi"],
    line_comment: "#",
    block_comment: None,
    string_delimiters: &['"', '\''],
    multiline_string: None,
    markup_aware: false,
    block_style: BlockStyle::Indentation,
    doc_placement: DocPlacement::BodyLeading,
    attachment_patterns: &[r"^\s*@"],
    class_patterns: &[r"^\s*class\s+[A-Za-z_]\w*"],
    function_patterns: &[r"^\s*(?:async\s+)?def\s+[A-Za-z_]\w*"],
    statement_keywords: &[],
    docstring_format: "\"\"\"\n\"\"\"",
};

pub static JAVA: LanguageDescriptor = LanguageDescriptor {
    language: Language::Java,
    name: "java",
    extensions: &["java"],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    string_delimiters: &['"', '\''],
    multiline_string: None,
    markup_aware: false,
    block_style: BlockStyle::Braces,
    doc_placement: DocPlacement::Preceding,
    attachment_patterns: &[r"^\s*@[A-Za-z_][\w.]*(?:\(.*\))?\s*$"],
    class_patterns: &[
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|protected|private|static|final|abstract|sealed|non-sealed|strictfp)\s+)*(?:class|interface|enum|record|@interface)\s+[A-Za-z_$][\w$]*",
    ],
    function_patterns: &[
        // methods with a return type
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:(?:public|protected|private|static|final|abstract|synchronized|native|default|strictfp)\s+)*(?:<[^>]*>\s*)?[A-Za-z_$][\w$.]*(?:<.*>)?(?:\[\])*\s+[A-Za-z_$][\w$]*\s*\(",
        // constructors
        r"^\s*(?:@\w+(?:\([^)]*\))?\s+)*(?:public|protected|private)\s+[A-Z][\w$]*\s*\(",
    ],
    statement_keywords: &[
        "if", "else", "for", "while", "do", "switch", "case", "catch", "try", "finally",
        "return", "throw", "new", "assert", "yield", "break", "continue",
    ],
    docstring_format: JSDOC_FORMAT,
};

const JS_CLASS_PATTERNS: &[&str] = &[
    r"^\s*(?:export\s+)?(?:default\s+)?(?:declare\s+)?(?:abstract\s+)?class\b",
    r"^\s*(?:export\s+)?(?:const|let|var)\s+[\w$]+\s*=\s*class\b",
];

const JS_FUNCTION_PATTERNS: &[&str] = &[
    // function declarations and expressions at line start
    r"^\s*(?:export\s+)?(?:default\s+)?(?:async\s+)?function\b",
    // assignments / properties bound to a function or an arrow
    r"^\s*(?:export\s+)?(?:(?:const|let|var)\s+)?(?:(?:static|readonly|public|private|protected)\s+)*(?:this\.)?[\w$.#]+\s*(?::\s*[^=]+?)?\s*[:=]\s*(?:async\s+)?(?:function\b|(?:\([^()]*\)|[\w$]+)\s*(?::\s*[^=]+?)?\s*=>)",
    // class and object methods; a call taking a callback is not a header
    r"^\s*(?:(?:static|async|get|set|public|private|protected|readonly|override|abstract)\s+)*\*?\s*[\w$#]+\s*(?:<[^>]*>)?\s*\((?:[^;()]|\([^;()]*\))*\)\s*(?::\s*[^{;=]+)?\s*\{",
];

const JS_STATEMENT_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "case", "catch", "try", "finally", "return",
    "throw", "new", "with", "typeof", "await", "yield", "delete", "void",
];

const JS_ATTACHMENTS: &[&str] = &[r"^\s*@[A-Za-z_][\w.]*(?:\(.*\))?\s*$"];

pub static JAVASCRIPT: LanguageDescriptor = LanguageDescriptor {
    language: Language::JavaScript,
    name: "javascript",
    extensions: &["js", "mjs", "cjs"],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    string_delimiters: &['"', '\''],
    multiline_string: Some('`'),
    markup_aware: false,
    block_style: BlockStyle::Braces,
    doc_placement: DocPlacement::Preceding,
    attachment_patterns: JS_ATTACHMENTS,
    class_patterns: JS_CLASS_PATTERNS,
    function_patterns: JS_FUNCTION_PATTERNS,
    statement_keywords: JS_STATEMENT_KEYWORDS,
    docstring_format: JSDOC_FORMAT,
};

pub static TYPESCRIPT: LanguageDescriptor = LanguageDescriptor {
    language: Language::TypeScript,
    name: "typescript",
    extensions: &["ts", "mts", "cts"],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    string_delimiters: &['"', '\''],
    multiline_string: Some('`'),
    markup_aware: false,
    block_style: BlockStyle::Braces,
    doc_placement: DocPlacement::Preceding,
    attachment_patterns: JS_ATTACHMENTS,
    class_patterns: JS_CLASS_PATTERNS,
    function_patterns: JS_FUNCTION_PATTERNS,
    statement_keywords: JS_STATEMENT_KEYWORDS,
    docstring_format: JSDOC_FORMAT,
};

pub static JSX: LanguageDescriptor = LanguageDescriptor {
    language: Language::Jsx,
    name: "jsx",
    extensions: &["jsx", "tsx"],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    string_delimiters: &['"', '\''],
    multiline_string: Some('`'),
    markup_aware: true,
    block_style: BlockStyle::Braces,
    doc_placement: DocPlacement::Preceding,
    attachment_patterns: JS_ATTACHMENTS,
    class_patterns: JS_CLASS_PATTERNS,
    function_patterns: JS_FUNCTION_PATTERNS,
    statement_keywords: JS_STATEMENT_KEYWORDS,
    docstring_format: JSDOC_FORMAT,
};

pub static CPP: LanguageDescriptor = LanguageDescriptor {
    language: Language::Cpp,
    name: "cpp",
    extensions: &["c", "h", "cc", "cpp", "cxx", "hpp", "hh"],
    line_comment: "//",
    block_comment: Some(("/*", "*/")),
    string_delimiters: &['"', '\''],
    multiline_string: None,
    markup_aware: false,
    block_style: BlockStyle::Braces,
    doc_placement: DocPlacement::Preceding,
    attachment_patterns: &[r"^\s*template\s*<.*>\s*$"],
    class_patterns: &[r"^\s*(?:template\s*<.*>\s*)?(?:typedef\s+)?(?:class|struct|union)\b[^=;()]*$"],
    function_patterns: &[
        r"^\s*(?:template\s*<.*>\s*)?(?:(?:static|inline|virtual|extern|constexpr|explicit|friend)\s+)*(?:[A-Za-z_][\w:<>,*&\s]*?[\s*&]+)?~?[A-Za-z_][\w:~]*\s*\([^;]*$",
    ],
    statement_keywords: &[
        "if", "else", "for", "while", "do", "switch", "case", "catch", "try", "return", "throw",
        "new", "delete", "sizeof", "goto",
    ],
    docstring_format: JSDOC_FORMAT,
};
