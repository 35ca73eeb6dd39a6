//! Rule identifiers emitted by the built-in checkers.
//!
//! These strings are part of the public contract: fix derivation, the
//! `disabled_rules` configuration and report consumers all key on them.

// Schema validation
pub const SCHEMA_PREFIX: &str = "schema.";
pub const SCHEMA_MISSING_REQUIRED: &str = "schema.missing_required";
pub const SCHEMA_TYPE_ERROR: &str = "schema.type_error";
pub const SCHEMA_MIN_LENGTH: &str = "schema.min_length";
pub const SCHEMA_MAX_LENGTH: &str = "schema.max_length";
pub const SCHEMA_PATTERN: &str = "schema.pattern";
pub const SCHEMA_ENUM: &str = "schema.enum";
pub const SCHEMA_MINIMUM: &str = "schema.minimum";
pub const SCHEMA_MAXIMUM: &str = "schema.maximum";

// Format dispatcher
pub const FORMAT_READ: &str = "format.read";
pub const FORMAT_UNKNOWN: &str = "format.unknown";
pub const JSON_SYNTAX: &str = "json.syntax";
pub const YAML_SYNTAX: &str = "yaml.syntax";
pub const ENV_VALUE_UNQUOTED: &str = "env.value.unquoted";
pub const ENV_LINE_MALFORMED: &str = "env.line.malformed";
pub const ENV_KEY_FORMAT: &str = "env.key.format";
pub const DOCKER_FROM_MISSING: &str = "docker.from.missing";
pub const DOCKER_WORKDIR_MISSING: &str = "docker.workdir.missing";
pub const DOCKER_COPY_MISSING: &str = "docker.copy.missing";
pub const MAKEFILE_TARGETS_MISSING: &str = "makefile.targets.missing";
pub const MAKEFILE_RECIPE_INDENT: &str = "makefile.recipe.indent";
pub const MAKEFILE_PHONY_MISSING: &str = "makefile.phony.missing";
pub const GITIGNORE_PATTERN_MISSING: &str = "gitignore.pattern.missing";
pub const DOCKERIGNORE_PATTERN_MISSING: &str = "dockerignore.pattern.missing";

// Manifests
pub const PACKAGE_SYNTAX: &str = "package.syntax";
pub const PACKAGE_NAME_REQUIRED: &str = "package.name.required";
pub const PACKAGE_VERSION_REQUIRED: &str = "package.version.required";
pub const PACKAGE_NAME_FORMAT: &str = "package.name.format";
pub const PACKAGE_VERSION_EMPTY: &str = "package.version.empty";
pub const GOMOD_MODULE_MISSING: &str = "gomod.module.missing";
pub const GOMOD_GO_MISSING: &str = "gomod.go.missing";
pub const GOMOD_GO_INVALID: &str = "gomod.go.invalid";

// Project structure
pub const README_REQUIRED: &str = "structure.readme.required";
pub const LICENSE_REQUIRED: &str = "structure.license.required";
pub const GITIGNORE_REQUIRED: &str = "structure.gitignore.required";
pub const NAMING_CONVENTIONS: &str = "quality.naming.conventions";
pub const FILE_PERMISSIONS: &str = "security.file.permissions";
pub const FILE_EXECUTABLE: &str = "quality.file.executable";
pub const GO_ENTRYPOINT: &str = "structure.go.entrypoint";
pub const GO_PKG: &str = "structure.go.pkg";
pub const GO_INTERNAL: &str = "structure.go.internal";
pub const NODE_ENTRYPOINT: &str = "structure.node.entrypoint";
pub const PYTHON_SRC: &str = "structure.python.src";
pub const DOCKER_DOCKERIGNORE: &str = "structure.docker.dockerignore";
pub const TEMPLATE_FILE_EXTENSION: &str = "template.file.extension";
