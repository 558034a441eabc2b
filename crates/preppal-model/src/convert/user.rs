use preppal_entity::user::Model as UserModel;

use crate::convert::FromDbModel;
use crate::user::User;

impl FromDbModel<UserModel> for User {
    fn from_db_model(model: UserModel) -> Self {
        Self {
            id: model.id,
            email: model.email,
            username: model.username,
            available_tokens: model.available_tokens,
        }
    }
}
