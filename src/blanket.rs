use super::*;

impl<'src, T, I, O> Parser<'src, I, O> for &T
where
    T: ?Sized + Parser<'src, I, O>,
    I: ?Sized + Input,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        (**self).go(cursor, sink)
    }
}

impl<'src, T, I, O> Parser<'src, I, O> for Box<T>
where
    T: ?Sized + Parser<'src, I, O>,
    I: ?Sized + Input,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        T::go(self, cursor, sink)
    }
}

impl<'src, T, I, O> Parser<'src, I, O> for Rc<T>
where
    T: ?Sized + Parser<'src, I, O>,
    I: ?Sized + Input,
{
    #[inline]
    fn go(&self, cursor: &mut Cursor<'src, I>, sink: &mut Sink<'_, 'src, I, O>) -> PResult {
        T::go(self, cursor, sink)
    }
}
