use common::error::{CategoryFetchError, SaveError};
use common::form::{CategoryRequest, FieldChange, ReadTicket, SubmitHandle};
use common::model::attachment::Attachment;
use common::model::category::Category;

#[derive(Clone)]
pub enum Msg {
    Field(FieldChange),
    CoverPicked(web_sys::File),
    CoverRead(ReadTicket, Result<Attachment, String>),
    WordPicked(web_sys::File),
    WordRead(ReadTicket, Result<Attachment, String>),
    RemoveCover,
    RemoveWordFile,
    TogglePublished,
    TogglePreview,
    CategoriesLoaded(CategoryRequest, Result<Vec<Category>, CategoryFetchError>),
    Submit,
    SaveFinished(SubmitHandle, Result<(), SaveError>),
    ShakeEnded(u64),
    Cancel,
}
