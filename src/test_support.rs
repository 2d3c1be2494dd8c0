use std::{
    borrow::Cow,
    io,
    panic::RefUnwindSafe,
    sync::{Arc, Mutex},
};

use crate::{
    formatter::common::color::SupportsColor,
    test::{Test, TestFn, TestFnHandle, TestMeta},
};

pub struct BuildTest {
    pub func: TestFnHandle,
    pub id: Cow<'static, str>,
}

impl Default for BuildTest {
    fn default() -> Self {
        Self {
            func: TestFnHandle::Static(&|| ()),
            id: Default::default(),
        }
    }
}

impl From<BuildTest> for Test {
    fn from(value: BuildTest) -> Self {
        Test::new(value.func, TestMeta { id: value.id })
    }
}

impl<F> From<F> for TestFnHandle
where
    F: TestFn + Send + Sync + RefUnwindSafe + 'static,
{
    fn from(value: F) -> Self {
        TestFnHandle::Owned(Box::new(value))
    }
}

macro_rules! test {
    {$($field:ident: $value:expr),* $(,)?} => {
        $crate::test::Test::from($crate::test_support::BuildTest {
            $($field: From::from($value),)*
            ..($crate::test_support::BuildTest {
                id: concat!(module_path!(), "::", file!(), ":", line!(), ":", column!()).into(),
                ..Default::default()
            })
        })
    };
}

pub(crate) use test;

/// Shared in-memory writer, so a formatter target can be inspected after the run.
#[derive(Debug, Default, Clone)]
pub struct Buffer(Arc<Mutex<Vec<u8>>>);

impl io::Write for Buffer {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let mut guard = self
            .0
            .lock()
            .map_err(|_| io::Error::other("poison error"))?;
        guard.write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        Ok(())
    }
}

impl SupportsColor for Buffer {
    fn supports_color(&self) -> bool {
        false
    }
}

impl Buffer {
    pub fn contents(&self) -> String {
        let guard = self.0.lock().expect("buffer not poisoned");
        String::from_utf8(guard.clone()).expect("formatter writes utf-8")
    }
}
