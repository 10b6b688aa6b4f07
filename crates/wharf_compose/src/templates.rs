//! Embedded template assets and the fixed render plan.

pub(crate) const DOCKER_COMPOSE: &str = include_str!("../templates/docker-compose.yml.tmpl");
pub(crate) const NGINX_CONF: &str = include_str!("../templates/nginx.conf.tmpl");
pub(crate) const NGINX_DEFAULT_CONF: &str = include_str!("../templates/default.conf.tmpl");
pub(crate) const PHP_DOCKERFILE: &str = include_str!("../templates/php.Dockerfile.tmpl");
pub(crate) const PHP_INI: &str = include_str!("../templates/php.ini.tmpl");
pub(crate) const PHP_FPM_CONF: &str = include_str!("../templates/php-fpm.conf.tmpl");
pub(crate) const MARIADB_CNF: &str = include_str!("../templates/my.cnf.tmpl");

/// Fixed list of (destination, template) pairs making up the output tree.
/// No two entries share a destination.
pub(crate) const RENDER_PLAN: &[(&str, &str)] = &[
    ("docker-compose.yml", DOCKER_COMPOSE),
    ("nginx/nginx.conf", NGINX_CONF),
    ("nginx/default.conf", NGINX_DEFAULT_CONF),
    ("php/Dockerfile", PHP_DOCKERFILE),
    ("php/php.ini", PHP_INI),
    ("php/php-fpm.conf", PHP_FPM_CONF),
    ("mariadb/my.cnf", MARIADB_CNF),
];
