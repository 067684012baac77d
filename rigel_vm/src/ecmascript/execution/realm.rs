// This Source Code Form is subject to the terms of the Mozilla Public
// License, v. 2.0. If a copy of the MPL was not distributed with this
// file, You can obtain one at https://mozilla.org/MPL/2.0/.

//! The realm: the global object, the global environment and the intrinsic
//! objects. Creation is two-phase: [`Realm::create`] allocates every
//! intrinsic as a bare object so the circular prototype/constructor links
//! can be made, then `builtins::populate_realm` fills in behaviour and
//! properties with the full agent available.

use super::agent::ExceptionType;
use super::environments::{Environment, EnvironmentKind, EnvironmentRecord};
use crate::ecmascript::execution::environments::object_environment::ObjectEnvironmentRecord;
use crate::ecmascript::types::{Object, ObjectRecord};
use crate::heap::Heap;

#[derive(Debug, Clone, Copy)]
pub struct Intrinsics {
    pub object_prototype: Object,
    pub function_prototype: Object,
    pub array_prototype: Object,
    pub string_prototype: Object,
    pub boolean_prototype: Object,
    pub number_prototype: Object,
    pub date_prototype: Object,
    pub regexp_prototype: Object,
    pub error_prototype: Object,
    pub eval_error_prototype: Object,
    pub range_error_prototype: Object,
    pub reference_error_prototype: Object,
    pub syntax_error_prototype: Object,
    pub type_error_prototype: Object,
    pub uri_error_prototype: Object,
    pub math: Object,
    pub object_constructor: Object,
    pub function_constructor: Object,
    pub array_constructor: Object,
    pub string_constructor: Object,
    pub boolean_constructor: Object,
    pub number_constructor: Object,
    pub date_constructor: Object,
    pub regexp_constructor: Object,
    pub error_constructor: Object,
    pub eval_error_constructor: Object,
    pub range_error_constructor: Object,
    pub reference_error_constructor: Object,
    pub syntax_error_constructor: Object,
    pub type_error_constructor: Object,
    pub uri_error_constructor: Object,
    /// The `[[ThrowTypeError]]` function of
    /// [§13.2.3](https://262.ecma-international.org/5.1/#sec-13.2.3).
    pub throw_type_error: Object,
}

impl Intrinsics {
    /// The constructor and prototype pair for a native error kind.
    pub fn native_error(&self, kind: ExceptionType) -> (Object, Object) {
        match kind {
            ExceptionType::Error => (self.error_constructor, self.error_prototype),
            ExceptionType::EvalError => (self.eval_error_constructor, self.eval_error_prototype),
            ExceptionType::RangeError => {
                (self.range_error_constructor, self.range_error_prototype)
            }
            ExceptionType::ReferenceError => (
                self.reference_error_constructor,
                self.reference_error_prototype,
            ),
            ExceptionType::SyntaxError => {
                (self.syntax_error_constructor, self.syntax_error_prototype)
            }
            ExceptionType::TypeError => (self.type_error_constructor, self.type_error_prototype),
            ExceptionType::UriError => (self.uri_error_constructor, self.uri_error_prototype),
        }
    }
}

#[derive(Debug)]
pub struct Realm {
    pub intrinsics: Intrinsics,
    pub global_object: Object,
    pub global_env: Environment,
}

impl Realm {
    /// Allocate the realm skeleton: every intrinsic object exists with its
    /// prototype link in place, but carries no properties or behaviour yet.
    pub(crate) fn create(heap: &mut Heap) -> Realm {
        let object_prototype = heap.create_object(ObjectRecord::ordinary(None));
        let mut bare = |prototype: Object| heap.create_object(ObjectRecord::ordinary(Some(prototype)));

        let function_prototype = bare(object_prototype);
        let array_prototype = bare(object_prototype);
        let string_prototype = bare(object_prototype);
        let boolean_prototype = bare(object_prototype);
        let number_prototype = bare(object_prototype);
        let date_prototype = bare(object_prototype);
        let regexp_prototype = bare(object_prototype);
        let error_prototype = bare(object_prototype);
        let eval_error_prototype = bare(error_prototype);
        let range_error_prototype = bare(error_prototype);
        let reference_error_prototype = bare(error_prototype);
        let syntax_error_prototype = bare(error_prototype);
        let type_error_prototype = bare(error_prototype);
        let uri_error_prototype = bare(error_prototype);
        let math = bare(object_prototype);

        let object_constructor = bare(function_prototype);
        let function_constructor = bare(function_prototype);
        let array_constructor = bare(function_prototype);
        let string_constructor = bare(function_prototype);
        let boolean_constructor = bare(function_prototype);
        let number_constructor = bare(function_prototype);
        let date_constructor = bare(function_prototype);
        let regexp_constructor = bare(function_prototype);
        let error_constructor = bare(function_prototype);
        let eval_error_constructor = bare(function_prototype);
        let range_error_constructor = bare(function_prototype);
        let reference_error_constructor = bare(function_prototype);
        let syntax_error_constructor = bare(function_prototype);
        let type_error_constructor = bare(function_prototype);
        let uri_error_constructor = bare(function_prototype);
        let throw_type_error = bare(function_prototype);

        let global_object = bare(object_prototype);
        let global_env = heap.create_environment(EnvironmentRecord {
            outer: None,
            kind: EnvironmentKind::Object(ObjectEnvironmentRecord {
                binding_object: global_object,
                provide_this: false,
            }),
        });

        Realm {
            intrinsics: Intrinsics {
                object_prototype,
                function_prototype,
                array_prototype,
                string_prototype,
                boolean_prototype,
                number_prototype,
                date_prototype,
                regexp_prototype,
                error_prototype,
                eval_error_prototype,
                range_error_prototype,
                reference_error_prototype,
                syntax_error_prototype,
                type_error_prototype,
                uri_error_prototype,
                math,
                object_constructor,
                function_constructor,
                array_constructor,
                string_constructor,
                boolean_constructor,
                number_constructor,
                date_constructor,
                regexp_constructor,
                error_constructor,
                eval_error_constructor,
                range_error_constructor,
                reference_error_constructor,
                syntax_error_constructor,
                type_error_constructor,
                uri_error_constructor,
                throw_type_error,
            },
            global_object,
            global_env,
        }
    }
}
