#[derive(Debug, Copy, Clone)]
pub struct TestCase {
    name: &'static str,
    group: TestGroup,
    body: TestBody,
}

impl TestCase {
    pub fn new(name: &'static str, group: TestGroup, body: TestBody) -> Self {
        Self { name, group, body }
    }

    pub fn small(name: &'static str, body: TestBody) -> Self {
        Self::new(name, TestGroup::Small, body)
    }

    pub fn large(name: &'static str, body: TestBody) -> Self {
        Self::new(name, TestGroup::Large, body)
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn group(&self) -> TestGroup {
        self.group
    }

    pub fn body(&self) -> &TestBody {
        &self.body
    }
}

/// A request body fixture together with the `Content-Type` it is sent with.
#[derive(Debug, Copy, Clone)]
pub struct TestBody {
    content_type: &'static str,
    content: &'static [u8],
}

impl TestBody {
    pub const fn new(content_type: &'static str, content: &'static [u8]) -> Self {
        Self { content_type, content }
    }

    pub fn content_type(&self) -> &'static str {
        self.content_type
    }

    pub fn content(&self) -> &'static [u8] {
        self.content
    }

    pub fn len(&self) -> usize {
        self.content.len()
    }

    pub fn is_empty(&self) -> bool {
        self.content.is_empty()
    }
}

#[derive(Clone, Copy, Debug)]
pub enum TestGroup {
    Small,
    Large,
}
