//! Static dictionaries backing identifier analysis.
//!
//! All tables are immutable compile-time data. Engines hold references to
//! them and never mutate them, so any number of engine instances can share
//! the same tables across threads.

use phf::{phf_map, phf_set};

/// Root words recognized by the morphology engine.
///
/// Biased toward vocabulary that actually shows up in source code; this is
/// not a general English dictionary.
pub static ROOT_WORDS: phf::Set<&'static str> = phf_set! {
    "accept", "access", "account", "action", "active", "adapt", "add",
    "address", "align", "alloc", "allocate", "allow", "analyze", "append",
    "apply", "assert", "assign", "attach", "attribute", "auth", "authorize",
    "backup", "balance", "base", "batch", "begin", "bind", "block", "body",
    "branch", "break", "bridge", "broadcast", "bucket", "buffer", "build",
    "bundle", "byte", "cache", "call", "cancel", "capture", "case", "cast",
    "catch", "chain", "change", "channel", "char", "check", "child", "chunk",
    "class", "clean", "clear", "client", "clone", "close", "code", "collect",
    "column", "combine", "command", "comment", "commit", "common", "compare",
    "compile", "complete", "compress", "compute", "concat", "condition",
    "config", "configure", "connect", "console", "constant", "construct", "consume",
    "contain", "content", "context", "control", "convert", "copy", "core",
    "count", "cover", "create", "current", "cursor", "custom", "cycle",
    "data", "date", "debug", "decide", "declare", "decode", "decrement",
    "default", "define", "delete", "deliver", "depend", "depth", "derive",
    "describe", "design", "detect", "device", "digest", "digit", "direct",
    "directory", "disable", "discover", "dispatch", "display", "divide",
    "document", "domain", "drain", "drive", "drop", "dump", "duplicate",
    "edge", "edit", "element", "emit", "empty", "enable", "encode", "end",
    "engine", "enter", "entry", "equal", "error", "escape", "evaluate",
    "event", "evict", "example", "exclude", "execute", "exist", "exit",
    "expand", "expect", "expire", "export", "express", "extend", "extract",
    "factor", "fail", "feature", "fetch", "field", "file", "fill", "filter",
    "final", "find", "finish", "fire", "first", "flag", "flat", "flush",
    "fold", "follow", "force", "fork", "form", "format", "forward", "frame",
    "free", "function", "generate", "get", "global", "graph", "group", "guard",
    "handle", "hash", "head", "header", "heap", "help", "hold", "hook", "host",
    "ignore", "image", "import", "include", "increment", "index", "infer",
    "inherit", "inject", "input", "insert", "inspect", "install", "instance",
    "interface", "intern", "invoke", "issue", "item", "iterate", "join",
    "keep", "kernel", "key", "kind", "label", "language", "last", "launch",
    "layer", "layout", "leaf", "length", "level", "lexer", "library",
    "limit", "line", "link", "list", "listen", "load", "local", "locate",
    "lock", "log", "lookup", "loop", "lower", "machine", "main", "manage",
    "map", "mark", "marker", "match", "measure", "member", "memory", "merge",
    "message", "meta", "method", "metric", "migrate", "mock", "mode",
    "model", "modify", "module", "monitor", "mount", "move", "mutate",
    "name", "nest", "network", "next", "node", "normal", "notify", "null",
    "number", "object", "observe", "offset", "open", "operate", "option",
    "order", "origin", "output", "owner", "pack", "package", "padding",
    "page", "pair", "panic", "parameter", "parent", "parse", "part",
    "partial", "pass", "patch", "path", "pattern", "pause", "peek", "pick",
    "pipe", "pivot", "place", "plan", "plugin", "point", "policy", "poll",
    "pool", "port", "position", "post", "prepare", "present", "preserve",
    "print", "probe", "process", "produce", "profile", "project", "promote",
    "prompt", "property", "protect", "protocol", "provide", "proxy", "prune",
    "publish", "pull", "purge", "push", "put", "query", "queue", "quote", "raise",
    "random", "range", "rank", "rate", "reach", "read", "receive", "record",
    "recover", "reduce", "refer", "refresh", "region", "register", "reject",
    "relate", "release", "remain", "remote", "remove", "rename", "render",
    "repeat", "replace", "reply", "report", "request", "require", "reserve",
    "reset", "resolve", "resource", "respond", "response", "rest", "result",
    "resume", "retain", "retry", "return", "reverse", "review", "revoke",
    "root", "rotate", "route", "row", "rule", "run", "sample", "save",
    "scale", "scan", "schedule", "schema", "scope", "score", "search",
    "second", "section", "secure", "seed", "seek", "segment", "select",
    "send", "sequence", "serialize", "serve", "server", "service", "session",
    "set", "setting", "shape", "share", "shift", "show", "shut", "sign",
    "signal", "simple", "single", "size", "skip", "sleep", "slice", "slot",
    "socket", "sort", "source", "space", "span", "spawn", "split", "stack",
    "stage", "stamp", "start", "state", "statement", "status", "step",
    "stop", "storage", "store", "stream", "string", "strip", "style",
    "submit", "subscribe", "suffix", "suggest", "sum", "summary", "supply",
    "support", "suppress", "swap", "switch", "symbol", "sync", "syntax",
    "system", "table", "tag", "tail", "take", "target", "task", "template",
    "term", "test", "text", "thread", "threshold", "throttle", "throw",
    "tick", "time", "timeout", "timer", "title", "token", "toggle", "tool",
    "top", "total", "touch", "trace", "track", "train", "transfer",
    "transform", "translate", "traverse", "tree", "trigger", "trim", "try",
    "tune", "tuple", "turn", "type", "unit", "unlock", "update", "upgrade",
    "upload", "upper", "usage", "use", "user", "valid", "validate", "value",
    "variable", "vector", "verify", "version", "view", "visit", "wait",
    "walk", "watch", "weight", "wheel", "widget", "width", "window", "word",
    "work", "worker", "wrap", "write", "yield", "zero", "zone",
};

/// Derivational prefixes, longest first so greedy stripping is unambiguous.
pub static PREFIXES: &[&str] = &[
    "counter", "inter", "trans", "under", "multi", "over", "post", "anti",
    "auto", "semi", "out", "pre", "sub", "mis", "non", "dis", "un", "re",
    "de", "in",
];

/// Derivational suffixes, longest first.
pub static SUFFIXES: &[&str] = &[
    "ization", "ability", "ation", "ment", "ness", "tion", "sion", "able",
    "ible", "ance", "ence", "ious", "less", "ing", "ity", "ive", "ize",
    "ise", "ful", "ous", "ant", "ent", "ies", "ery", "ism", "ist", "ed",
    "er", "or", "al", "ic", "ly", "es", "s", "y",
];

/// Abbreviations common in source code, with their preferred expansions.
///
/// Membership marks a word as an intentional-but-terse abbreviation rather
/// than an unknown token.
pub static KNOWN_ABBREVIATIONS: phf::Map<&'static str, &'static str> = phf_map! {
    "addr" => "address",
    "arg" => "argument",
    "args" => "arguments",
    "attr" => "attribute",
    "buf" => "buffer",
    "calc" => "calculate",
    "cb" => "callback",
    "cfg" => "config",
    "char" => "character",
    "cmd" => "command",
    "cnt" => "count",
    "col" => "column",
    "conn" => "connection",
    "ctx" => "context",
    "cur" => "current",
    "db" => "database",
    "decl" => "declaration",
    "del" => "delete",
    "dest" => "destination",
    "dir" => "directory",
    "doc" => "document",
    "dst" => "destination",
    "elem" => "element",
    "env" => "environment",
    "err" => "error",
    "exec" => "execute",
    "expr" => "expression",
    "fmt" => "format",
    "fn" => "function",
    "func" => "function",
    "hdr" => "header",
    "idx" => "index",
    "impl" => "implementation",
    "init" => "initialize",
    "iter" => "iterator",
    "len" => "length",
    "lib" => "library",
    "mgr" => "manager",
    "mod" => "module",
    "msg" => "message",
    "num" => "number",
    "obj" => "object",
    "op" => "operation",
    "opt" => "option",
    "param" => "parameter",
    "params" => "parameters",
    "pkg" => "package",
    "pos" => "position",
    "prev" => "previous",
    "proc" => "process",
    "ptr" => "pointer",
    "recv" => "receive",
    "ref" => "reference",
    "req" => "request",
    "res" => "result",
    "resp" => "response",
    "ret" => "return",
    "src" => "source",
    "stmt" => "statement",
    "str" => "string",
    "tmp" => "temporary",
    "tx" => "transaction",
    "util" => "utility",
    "val" => "value",
    "var" => "variable",
    "vec" => "vector",
    "win" => "window",
};

/// Industry acronyms accepted as-is in identifiers, with expansion text.
pub static KNOWN_ACRONYMS: phf::Map<&'static str, &'static str> = phf_map! {
    "ansi" => "American National Standards Institute",
    "api" => "application programming interface",
    "ascii" => "American Standard Code for Information Interchange",
    "ast" => "abstract syntax tree",
    "cli" => "command line interface",
    "cpu" => "central processing unit",
    "crud" => "create, read, update, delete",
    "css" => "cascading style sheets",
    "csv" => "comma-separated values",
    "dns" => "domain name system",
    "dto" => "data transfer object",
    "ftp" => "file transfer protocol",
    "gpu" => "graphics processing unit",
    "gui" => "graphical user interface",
    "html" => "hypertext markup language",
    "http" => "hypertext transfer protocol",
    "https" => "hypertext transfer protocol secure",
    "id" => "identifier",
    "io" => "input/output",
    "ip" => "internet protocol",
    "json" => "JavaScript object notation",
    "jwt" => "JSON web token",
    "lru" => "least recently used",
    "mvc" => "model-view-controller",
    "orm" => "object-relational mapping",
    "os" => "operating system",
    "pdf" => "portable document format",
    "ram" => "random access memory",
    "rest" => "representational state transfer",
    "rpc" => "remote procedure call",
    "sdk" => "software development kit",
    "sql" => "structured query language",
    "ssh" => "secure shell",
    "ssl" => "secure sockets layer",
    "tcp" => "transmission control protocol",
    "tls" => "transport layer security",
    "ttl" => "time to live",
    "udp" => "user datagram protocol",
    "ui" => "user interface",
    "uri" => "uniform resource identifier",
    "url" => "uniform resource locator",
    "utf" => "Unicode transformation format",
    "uuid" => "universally unique identifier",
    "ux" => "user experience",
    "xml" => "extensible markup language",
    "yaml" => "YAML ain't markup language",
};

/// Verbs and nouns so established in programming that they are accepted
/// without morphological scrutiny.
pub static COMMON_TERMS: phf::Set<&'static str> = phf_set! {
    "add", "append", "apply", "args", "array", "bool", "buffer", "build",
    "builder", "cache", "callback", "check", "class", "client", "close",
    "config", "context", "copy", "count", "create", "data", "decode",
    "delete", "dict", "emit", "encode", "entry", "error", "factory",
    "fetch", "field", "file", "filter", "find", "flush", "get", "handle",
    "handler", "hash", "helper", "index", "info", "init", "input", "insert",
    "int", "item", "iter", "job", "key", "list", "listener", "load",
    "logger", "main", "make", "manager", "map", "merge", "mock", "name",
    "new", "node", "open", "output", "parse", "parser", "patch", "path",
    "pop", "post", "print", "process", "push", "put", "query", "queue",
    "read", "reader", "remove", "reset", "result", "run", "runner", "save",
    "send", "server", "service", "set", "size", "sort", "split", "start",
    "state", "status", "stop", "store", "string", "task", "test", "type",
    "update", "user", "util", "validate", "value", "worker", "write",
    "writer",
};

/// Whether a lowercase word is a listed abbreviation.
pub fn is_known_abbreviation(word: &str) -> bool {
    KNOWN_ABBREVIATIONS.contains_key(word)
}

/// Expansion text for a listed abbreviation.
pub fn abbreviation_expansion(word: &str) -> Option<&'static str> {
    KNOWN_ABBREVIATIONS.get(word).copied()
}

/// Whether a lowercase word is a known acronym.
pub fn is_known_acronym(word: &str) -> bool {
    KNOWN_ACRONYMS.contains_key(word)
}

/// Expansion text for a known acronym.
pub fn acronym_expansion(word: &str) -> Option<&'static str> {
    KNOWN_ACRONYMS.get(word).copied()
}

/// Whether a lowercase word is a common programming term.
pub fn is_common_term(word: &str) -> bool {
    COMMON_TERMS.contains(word)
}
